//! Static tool catalog used for navigation and search.
//!
//! Every tool on the site has one descriptor here. Descriptors are
//! compile-time data: never mutated, never persisted.

use std::str::FromStr;

use serde::Serialize;

use crate::error::StudykitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Calculators,
    Image,
    Pdf,
    Student,
    Ai,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 5] = [
        ToolCategory::Calculators,
        ToolCategory::Image,
        ToolCategory::Pdf,
        ToolCategory::Student,
        ToolCategory::Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Calculators => "calculators",
            ToolCategory::Image       => "image",
            ToolCategory::Pdf         => "pdf",
            ToolCategory::Student     => "student",
            ToolCategory::Ai          => "ai",
        }
    }

    pub fn info(&self) -> &'static CategoryInfo {
        // CATEGORIES is ordered like ALL
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        &CATEGORIES[idx]
    }
}

impl FromStr for ToolCategory {
    type Err = StudykitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| StudykitError::UnknownCategory(s.to_string()))
    }
}

/// Display metadata for a category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: ToolCategory,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    pub icon: &'static str,
    pub keywords: &'static [&'static str],
    pub path: &'static str,
}

impl Tool {
    fn matches(&self, lower_query: &str) -> bool {
        self.name.to_lowercase().contains(lower_query)
            || self.description.to_lowercase().contains(lower_query)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(lower_query))
    }
}

static CATEGORIES: [CategoryInfo; 5] = [
    CategoryInfo { id: ToolCategory::Calculators, name: "Calculators",   icon: "calculator",     color: "bg-blue-500" },
    CategoryInfo { id: ToolCategory::Image,       name: "Image Tools",   icon: "image",          color: "bg-purple-500" },
    CategoryInfo { id: ToolCategory::Pdf,         name: "PDF Tools",     icon: "file-text",      color: "bg-red-500" },
    CategoryInfo { id: ToolCategory::Student,     name: "Student Tools", icon: "graduation-cap", color: "bg-green-500" },
    CategoryInfo { id: ToolCategory::Ai,          name: "AI Tools",      icon: "sparkles",       color: "bg-amber-500" },
];

macro_rules! tool {
    ($id:literal, $name:literal, $desc:literal, $cat:ident, $icon:literal, [$($kw:literal),* $(,)?]) => {
        Tool {
            id: $id,
            name: $name,
            description: $desc,
            category: ToolCategory::$cat,
            icon: $icon,
            keywords: &[$($kw),*],
            path: concat!("/tools/", $id),
        }
    };
}

static TOOLS: [Tool; 39] = [
    // ── Calculators ──────────────────────────────────────────────────────────
    tool!("basic-calculator", "Basic Calculator", "Perform basic arithmetic operations", Calculators, "calculator", ["math", "add", "subtract", "multiply", "divide"]),
    tool!("scientific-calculator", "Scientific Calculator", "Advanced mathematical calculations", Calculators, "calculator", ["math", "sin", "cos", "tan", "log", "power", "scientific"]),
    tool!("percentage-calculator", "Percentage Calculator", "Calculate percentages easily", Calculators, "percent", ["percent", "ratio", "discount"]),
    tool!("emi-calculator", "EMI Calculator", "Calculate loan EMI payments", Calculators, "wallet", ["loan", "interest", "monthly", "payment", "finance"]),
    tool!("gpa-calculator", "GPA Calculator", "Calculate your Grade Point Average", Calculators, "graduation-cap", ["grades", "score", "academic", "semester"]),
    tool!("cgpa-calculator", "CGPA Calculator", "Calculate Cumulative GPA", Calculators, "graduation-cap", ["grades", "cumulative", "overall", "academic"]),
    tool!("age-calculator", "Age Calculator", "Calculate age from date of birth", Calculators, "calendar", ["birthday", "years", "months", "days"]),
    tool!("unit-converter", "Unit Converter", "Convert between different units", Calculators, "ruler", ["length", "weight", "temperature", "convert"]),
    tool!("time-duration", "Time Duration Calculator", "Calculate time between dates", Calculators, "clock", ["hours", "minutes", "difference", "duration"]),

    // ── Image tools ──────────────────────────────────────────────────────────
    tool!("image-resizer", "Image Resizer", "Resize images to any dimension", Image, "image", ["resize", "scale", "dimension", "photo"]),
    tool!("image-cropper", "Image Cropper", "Crop images to your needs", Image, "crop", ["crop", "trim", "cut", "photo"]),
    tool!("image-compressor", "Image Compressor", "Compress images to reduce size", Image, "minimize-2", ["compress", "optimize", "reduce", "size"]),
    tool!("jpg-to-png", "JPG to PNG", "Convert JPG images to PNG format", Image, "file-image", ["convert", "format", "transparent"]),
    tool!("png-to-jpg", "PNG to JPG", "Convert PNG images to JPG format", Image, "file-image", ["convert", "format", "jpeg"]),
    tool!("image-grayscale", "Image Grayscale", "Convert images to black and white", Image, "palette", ["black", "white", "monochrome", "filter"]),
    tool!("image-preview", "Image Preview Tool", "Preview and analyze images", Image, "eye", ["view", "analyze", "info", "metadata"]),

    // ── PDF tools ────────────────────────────────────────────────────────────
    tool!("pdf-merge", "PDF Merge", "Combine multiple PDFs into one", Pdf, "file-plus", ["combine", "join", "merge", "document"]),
    tool!("pdf-split", "PDF Split", "Split PDF into multiple files", Pdf, "scissors", ["separate", "divide", "extract"]),
    tool!("pdf-reorder", "PDF Page Reorder", "Rearrange pages in a PDF", Pdf, "arrow-up-down", ["arrange", "order", "pages", "sort"]),
    tool!("images-to-pdf", "Images to PDF", "Convert images to PDF document", Pdf, "file-image", ["convert", "create", "photos"]),
    tool!("pdf-viewer", "PDF Viewer", "View PDF documents online", Pdf, "eye", ["view", "read", "open"]),
    tool!("pdf-extract", "PDF Page Extract", "Extract specific pages from PDF", Pdf, "file-output", ["extract", "pages", "select"]),
    tool!("pdf-rotate", "PDF Rotate", "Rotate PDF pages", Pdf, "rotate-cw", ["rotate", "orientation", "turn"]),
    tool!("pdf-metadata", "PDF Metadata Viewer", "View PDF document information", Pdf, "info", ["info", "properties", "details"]),

    // ── Student tools ────────────────────────────────────────────────────────
    tool!("notes-manager", "Notes Manager", "Create and organize your notes", Student, "sticky-note", ["notes", "write", "organize", "study"]),
    tool!("todo-list", "To-Do List", "Manage your tasks and to-dos", Student, "check-square", ["tasks", "checklist", "organize", "productivity"]),
    tool!("pomodoro-timer", "Pomodoro Timer", "Focus with timed work sessions", Student, "timer", ["focus", "productivity", "break", "study"]),
    tool!("study-planner", "Study Planner", "Plan your study schedule", Student, "book-open", ["schedule", "plan", "organize", "calendar"]),
    tool!("homework-tracker", "Homework Tracker", "Track assignments and deadlines", Student, "clipboard-list", ["assignments", "deadline", "track", "homework"]),
    tool!("timetable-generator", "Timetable Generator", "Create your class timetable", Student, "calendar-days", ["schedule", "classes", "weekly", "timetable"]),
    tool!("exam-countdown", "Exam Countdown Timer", "Count down to your exams", Student, "hourglass", ["exam", "countdown", "deadline", "timer"]),

    // ── AI tools ─────────────────────────────────────────────────────────────
    tool!("essay-generator", "Essay Generator", "Generate essay outlines and content", Ai, "file-edit", ["write", "essay", "content", "generate"]),
    tool!("text-summarizer", "Text Summarizer", "Summarize long texts quickly", Ai, "align-left", ["summary", "shorten", "condense", "brief"]),
    tool!("paraphraser", "Paraphraser", "Rephrase text in different ways", Ai, "wand-2", ["rewrite", "rephrase", "paraphrase"]),
    tool!("grammar-checker", "Grammar Checker", "Check and fix grammar errors", Ai, "spell-check", ["grammar", "spelling", "correct", "proofread"]),
    tool!("notes-generator", "Notes Generator", "Generate study notes from text", Ai, "sticky-note", ["notes", "study", "generate", "key points"]),
    tool!("question-generator", "Question Generator", "Generate questions from content", Ai, "file-question", ["questions", "quiz", "test", "practice"]),
    tool!("cheatsheet-generator", "Cheat Sheet Generator", "Create quick reference sheets", Ai, "list-checks", ["cheatsheet", "reference", "summary", "quick"]),
    tool!("topic-explainer", "Topic Explainer", "Get simple explanations of topics", Ai, "lightbulb", ["explain", "understand", "learn", "topic"]),
];

/// All tools in display order.
pub fn tools() -> &'static [Tool] {
    &TOOLS
}

pub fn categories() -> &'static [CategoryInfo] {
    &CATEGORIES
}

pub fn tools_by_category(category: ToolCategory) -> Vec<&'static Tool> {
    TOOLS.iter().filter(|t| t.category == category).collect()
}

pub fn tool_by_id(id: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|t| t.id == id)
}

/// Case-insensitive substring search over name, description and keywords.
/// A blank query returns every tool.
pub fn search_tools(query: &str) -> Vec<&'static Tool> {
    let lower = query.trim().to_lowercase();
    if lower.is_empty() {
        return TOOLS.iter().collect();
    }
    TOOLS.iter().filter(|t| t.matches(&lower)).collect()
}
