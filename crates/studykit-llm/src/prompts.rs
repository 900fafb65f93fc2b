//! Prompt builders for the AI study tools.
//!
//! Option values arrive as free-form strings from the browser; unknown or
//! missing values fall back to each option's default.

macro_rules! lenient_enum {
    ($name:ident, default = $default:ident, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Parse, falling back to the default for unknown or missing input.
            pub fn parse_or_default(s: Option<&str>) -> Self {
                s.and_then(Self::parse).unwrap_or_default()
            }
        }

        impl Default for $name {
            fn default() -> Self { $name::$default }
        }
    };
}

lenient_enum!(SummaryLength, default = Medium, {
    Short => "short",
    Medium => "medium",
    Long => "long",
});

lenient_enum!(NoteFormat, default = Bullet, {
    Bullet => "bullet",
    Numbered => "numbered",
    Cornell => "cornell",
});

lenient_enum!(QuestionKind, default = Mixed, {
    Mixed => "mixed",
    What => "what",
    How => "how",
    Why => "why",
    TrueFalse => "tf",
});

lenient_enum!(ParaphraseStyle, default = Standard, {
    Standard => "standard",
    Formal => "formal",
    Simple => "simple",
});

lenient_enum!(Level, default = Beginner, {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

pub const DEFAULT_ESSAY_TYPE: &str = "argumentative";
pub const DEFAULT_PARAGRAPHS: u32 = 5;
pub const MIN_PARAGRAPHS: u32 = 3;
pub const MAX_PARAGRAPHS: u32 = 10;
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 20;

/// Paragraph count clamped so the essay always has at least one body paragraph.
pub fn essay_paragraphs(requested: Option<u64>) -> u32 {
    match requested {
        Some(n) if n > 0 => n.clamp(MIN_PARAGRAPHS as u64, MAX_PARAGRAPHS as u64) as u32,
        _ => DEFAULT_PARAGRAPHS,
    }
}

pub fn question_count(requested: Option<u64>) -> u32 {
    match requested {
        Some(n) if n > 0 => n.min(MAX_QUESTION_COUNT as u64) as u32,
        _ => DEFAULT_QUESTION_COUNT,
    }
}

pub fn summarize(text: &str, length: SummaryLength) -> String {
    let instruction = match length {
        SummaryLength::Short  => "Create a brief 2-3 sentence summary.",
        SummaryLength::Medium => "Create a concise summary of about 4-6 sentences.",
        SummaryLength::Long   => "Create a detailed summary covering all main points in about 8-10 sentences.",
    };
    format!(
        "You are an expert text summarizer. {instruction}\n\n\
         Text to summarize:\n{text}\n\n\
         Provide only the summary, no additional commentary."
    )
}

pub fn essay(topic: &str, essay_type: &str, paragraphs: u32) -> String {
    let body = paragraphs.saturating_sub(2).max(1);
    format!(
        "You are an expert essay writer. Write a well-structured {essay_type} essay about \"{topic}\" \
         with exactly {paragraphs} paragraphs.\n\n\
         Structure:\n\
         - Start with an engaging introduction paragraph\n\
         - Include {body} body paragraphs with clear topic sentences and supporting evidence\n\
         - End with a strong conclusion\n\n\
         Write in a clear, academic style appropriate for students. Use proper paragraph breaks."
    )
}

pub fn grammar(text: &str) -> String {
    format!(
        "You are an expert grammar checker. Analyze the following text for grammar, spelling, \
         and punctuation errors.\n\n\
         Text:\n{text}\n\n\
         Respond in this exact JSON format:\n\
         {{\n  \"corrected\": \"The corrected version of the text with all errors fixed\",\n  \
         \"issues\": [\"List of specific issues found and corrected, e.g., 'Changed \"their\" to \"there\" (wrong word usage)'\"]\n}}\n\n\
         If no errors are found, set issues to [\"No grammar issues found. The text is correct.\"]"
    )
}

pub fn notes(text: &str, format: NoteFormat) -> String {
    let instruction = match format {
        NoteFormat::Bullet   => "Use bullet points (•) for each key point",
        NoteFormat::Numbered => "Use numbered list (1., 2., 3., etc.)",
        NoteFormat::Cornell  => "Use Cornell note format with main points on the left and \
                                 details/explanations on the right, separated by | character",
    };
    format!(
        "You are an expert note-taker. Extract the key points and important information from \
         the following text and create study notes.\n\n\
         {instruction}\n\n\
         Text:\n{text}\n\n\
         Create comprehensive, well-organized notes that a student could use for studying. \
         Include all important concepts, definitions, and facts."
    )
}

pub fn questions(text: &str, kind: QuestionKind, count: u32) -> String {
    let instruction = match kind {
        QuestionKind::Mixed     => "Include a variety of question types (what, how, why, and true/false)",
        QuestionKind::What      => "Focus on 'What' questions testing factual knowledge",
        QuestionKind::How       => "Focus on 'How' questions testing understanding of processes",
        QuestionKind::Why       => "Focus on 'Why' questions testing deeper comprehension",
        QuestionKind::TrueFalse => "Create True/False questions",
    };
    format!(
        "You are an expert educator creating practice questions. Based on the following text, \
         generate {count} study questions.\n\n\
         {instruction}\n\n\
         Text:\n{text}\n\n\
         Format each question clearly with:\n\
         - Question number\n\
         - The question\n\
         - A line for the answer (for open questions) or [ ] True [ ] False options\n\n\
         Make questions that test genuine understanding of the material."
    )
}

pub fn paraphrase(text: &str, style: ParaphraseStyle) -> String {
    let instruction = match style {
        ParaphraseStyle::Standard => "Rephrase while maintaining the same tone and complexity",
        ParaphraseStyle::Formal   => "Rephrase using formal, academic language",
        ParaphraseStyle::Simple   => "Rephrase using simpler, easier-to-understand language",
    };
    format!(
        "You are an expert paraphraser. Rephrase the following text while preserving its meaning.\n\n\
         Style: {instruction}\n\n\
         Original text:\n{text}\n\n\
         Provide only the paraphrased version, no additional commentary."
    )
}

pub fn cheat_sheet(topic: &str, level: Level) -> String {
    let level = level.as_str();
    format!(
        "You are an expert educator. Create a comprehensive cheat sheet/quick reference guide \
         about \"{topic}\" for a {level} level student.\n\n\
         Include:\n\
         - Key definitions\n\
         - Important formulas or rules (if applicable)\n\
         - Common examples\n\
         - Tips and tricks\n\
         - Common mistakes to avoid\n\n\
         Format it clearly with headers and bullet points for easy scanning."
    )
}

pub fn explain(topic: &str, level: Level) -> String {
    let instruction = match level {
        Level::Beginner     => "Explain like I'm completely new to this. Use simple language and everyday analogies.",
        Level::Intermediate => "Explain with moderate detail, assuming some basic knowledge.",
        Level::Advanced     => "Provide an in-depth explanation with technical details and nuances.",
    };
    format!(
        "You are an expert teacher. Explain the topic: \"{topic}\"\n\n\
         {instruction}\n\n\
         Structure your explanation with:\n\
         1. A clear introduction\n\
         2. Main concepts broken down step by step\n\
         3. Examples to illustrate key points\n\
         4. A brief summary\n\n\
         Make it engaging and easy to understand."
    )
}
