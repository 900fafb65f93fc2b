//! Study actions run against an LLM backend.
//!
//! Each action builds one prompt, makes one upstream call and records an
//! audit entry. Empty model output is replaced with a fixed fallback message.

use std::sync::{Arc, LazyLock};
use std::time::Instant;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::audit::LlmAuditEntry;
use crate::backend::{LlmBackend, LlmError, LlmRequest};
use crate::prompts::{self, Level, NoteFormat, ParaphraseStyle, QuestionKind, SummaryLength};

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

pub const GRAMMAR_FALLBACK_ISSUE: &str = "Unable to analyze grammar. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarReport {
    pub corrected: String,
    pub issues: Vec<String>,
}

impl GrammarReport {
    /// Extract the JSON object from a model reply. Falls back to the
    /// original text with a single "unable to analyze" issue.
    pub fn from_reply(reply: &str, original: &str) -> Self {
        let parsed = JSON_OBJECT
            .find(reply)
            .map(|m| serde_json::from_str::<GrammarReport>(m.as_str()));

        match parsed {
            Some(Ok(report)) => report,
            Some(Err(e)) => {
                tracing::error!(error = %e, "Failed to parse grammar response");
                Self::fallback(original)
            }
            None => Self::fallback(original),
        }
    }

    fn fallback(original: &str) -> Self {
        Self {
            corrected: original.to_string(),
            issues: vec![GRAMMAR_FALLBACK_ISSUE.to_string()],
        }
    }
}

#[derive(Clone)]
pub struct Assistant {
    backend: Arc<dyn LlmBackend>,
}

impl Assistant {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    async fn generate(&self, action: &str, prompt: String) -> Result<String, LlmError> {
        let started = Instant::now();
        let resp = self.backend.complete(LlmRequest::prompt(prompt)).await?;

        LlmAuditEntry::new(
            action,
            resp.model.clone(),
            self.backend.name().to_string(),
            resp.prompt_tokens,
            resp.completion_tokens,
            &resp.content,
            started.elapsed().as_millis() as u64,
        )
        .emit();

        Ok(resp.content)
    }

    async fn generate_or(&self, action: &str, prompt: String, fallback: &str) -> Result<String, LlmError> {
        let text = self.generate(action, prompt).await?;
        if text.is_empty() {
            Ok(fallback.to_string())
        } else {
            Ok(text)
        }
    }

    pub async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, LlmError> {
        self.generate_or("summarize", prompts::summarize(text, length), "Unable to generate summary.").await
    }

    pub async fn essay(&self, topic: &str, essay_type: &str, paragraphs: u32) -> Result<String, LlmError> {
        self.generate_or("essay", prompts::essay(topic, essay_type, paragraphs), "Unable to generate essay.").await
    }

    pub async fn check_grammar(&self, text: &str) -> Result<GrammarReport, LlmError> {
        let reply = self.generate("grammar", prompts::grammar(text)).await?;
        Ok(GrammarReport::from_reply(&reply, text))
    }

    pub async fn notes(&self, text: &str, format: NoteFormat) -> Result<String, LlmError> {
        self.generate_or("notes", prompts::notes(text, format), "Unable to generate notes.").await
    }

    pub async fn questions(&self, text: &str, kind: QuestionKind, count: u32) -> Result<String, LlmError> {
        self.generate_or("questions", prompts::questions(text, kind, count), "Unable to generate questions.").await
    }

    pub async fn paraphrase(&self, text: &str, style: ParaphraseStyle) -> Result<String, LlmError> {
        self.generate_or("paraphrase", prompts::paraphrase(text, style), "Unable to paraphrase text.").await
    }

    pub async fn cheat_sheet(&self, topic: &str, level: Level) -> Result<String, LlmError> {
        self.generate_or("cheatsheet", prompts::cheat_sheet(topic, level), "Unable to generate cheat sheet.").await
    }

    pub async fn explain(&self, topic: &str, level: Level) -> Result<String, LlmError> {
        self.generate_or("explain", prompts::explain(topic, level), "Unable to explain topic.").await
    }
}
