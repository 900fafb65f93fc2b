//! AI proxy endpoints.
//!
//! Every action checks that a credential is configured, validates its one
//! required string field, then forwards to the Assistant. Upstream failures
//! are logged and surfaced as a generic 500.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};

use studykit_common::error::ApiError;
use studykit_llm::prompts::{
    self, Level, NoteFormat, ParaphraseStyle, QuestionKind, SummaryLength,
};
use studykit_llm::{Assistant, LlmError};

use crate::state::SharedState;

pub const NOT_CONFIGURED: &str = "AI service not configured. Please add GEMINI_API_KEY.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistAction {
    Summarize,
    Essay,
    Grammar,
    Notes,
    Questions,
    Paraphrase,
    CheatSheet,
    Explain,
}

impl AssistAction {
    pub const ALL: [AssistAction; 8] = [
        AssistAction::Summarize,
        AssistAction::Essay,
        AssistAction::Grammar,
        AssistAction::Notes,
        AssistAction::Questions,
        AssistAction::Paraphrase,
        AssistAction::CheatSheet,
        AssistAction::Explain,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AssistAction::Summarize  => "/api/ai/summarize",
            AssistAction::Essay      => "/api/ai/essay",
            AssistAction::Grammar    => "/api/ai/grammar",
            AssistAction::Notes      => "/api/ai/notes",
            AssistAction::Questions  => "/api/ai/questions",
            AssistAction::Paraphrase => "/api/ai/paraphrase",
            AssistAction::CheatSheet => "/api/ai/cheatsheet",
            AssistAction::Explain    => "/api/ai/explain",
        }
    }

    /// Name of the required string field in the request body.
    pub fn field(&self) -> &'static str {
        match self {
            AssistAction::Essay | AssistAction::CheatSheet | AssistAction::Explain => "topic",
            _ => "text",
        }
    }

    pub fn max_chars(&self) -> usize {
        match self {
            AssistAction::Summarize | AssistAction::Notes | AssistAction::Questions => 10_000,
            AssistAction::Grammar | AssistAction::Paraphrase => 5_000,
            AssistAction::Essay => 500,
            AssistAction::CheatSheet | AssistAction::Explain => 200,
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            AssistAction::Summarize  => "Failed to summarize text",
            AssistAction::Essay      => "Failed to generate essay",
            AssistAction::Grammar    => "Failed to check grammar",
            AssistAction::Notes      => "Failed to generate notes",
            AssistAction::Questions  => "Failed to generate questions",
            AssistAction::Paraphrase => "Failed to paraphrase text",
            AssistAction::CheatSheet => "Failed to generate cheat sheet",
            AssistAction::Explain    => "Failed to explain topic",
        }
    }

    fn missing_field(&self) -> ApiError {
        ApiError::BadRequest(format!("{} is required", capitalize(self.field())))
    }

    fn field_too_long(&self) -> ApiError {
        ApiError::BadRequest(format!(
            "{} exceeds {} character limit",
            capitalize(self.field()),
            with_thousands(self.max_chars())
        ))
    }

    fn upstream_failure(&self, err: LlmError) -> ApiError {
        tracing::error!(action = self.path(), error = %err, "upstream model call failed");
        ApiError::Internal(self.failure_message().to_string())
    }
}

/// `1234567` → `"1,234,567"`
fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A validated request: the assistant to use, the required input and the
/// rest of the body for optional settings.
struct AssistRequest {
    assistant: Assistant,
    input: String,
    body: Map<String, Value>,
}

impl AssistRequest {
    fn extract(
        state: &SharedState,
        action: AssistAction,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Self, ApiError> {
        let assistant = state
            .assistant
            .clone()
            .ok_or_else(|| ApiError::Unavailable(NOT_CONFIGURED.to_string()))?;

        // A body that is not a JSON object carries no fields at all. A body
        // over the transport limit is necessarily over the field limit too.
        let body = match body {
            Ok(Json(Value::Object(map))) => map,
            Ok(_) => Map::new(),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::debug!(action = action.path(), %rejection, "request body too large");
                return Err(action.field_too_long());
            }
            Err(rejection) => {
                tracing::debug!(action = action.path(), %rejection, "unreadable request body");
                Map::new()
            }
        };

        let input = validate_field(&body, action)?.to_string();
        Ok(Self { assistant, input, body })
    }

    fn opt_str(&self, key: &str) -> Option<&str> {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn opt_u64(&self, key: &str) -> Option<u64> {
        let v = self.body.get(key)?;
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    }
}

/// Required field must be a non-empty string no longer than the action's
/// limit. Length counts UTF-16 code units, as the browser does.
pub fn validate_field(body: &Map<String, Value>, action: AssistAction) -> Result<&str, ApiError> {
    let value = body
        .get(action.field())
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| action.missing_field())?;

    if value.encode_utf16().count() > action.max_chars() {
        return Err(action.field_too_long());
    }
    Ok(value)
}

/// GET /api/ai/status
pub async fn ai_status(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "configured": state.is_configured() }))
}

/// POST /api/ai/summarize
pub async fn summarize(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Summarize;
    let req = AssistRequest::extract(&state, action, body)?;
    let length = SummaryLength::parse_or_default(req.opt_str("length"));
    let result = req.assistant
        .summarize(&req.input, length)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}

/// POST /api/ai/essay
pub async fn essay(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Essay;
    let req = AssistRequest::extract(&state, action, body)?;
    let essay_type = req.opt_str("type").unwrap_or(prompts::DEFAULT_ESSAY_TYPE);
    let paragraphs = prompts::essay_paragraphs(req.opt_u64("paragraphs"));
    let result = req.assistant
        .essay(&req.input, essay_type, paragraphs)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}

/// POST /api/ai/grammar — responds with `{corrected, issues}` rather than `{result}`.
pub async fn grammar(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Grammar;
    let req = AssistRequest::extract(&state, action, body)?;
    let report = req.assistant
        .check_grammar(&req.input)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "corrected": report.corrected, "issues": report.issues })))
}

/// POST /api/ai/notes
pub async fn notes(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Notes;
    let req = AssistRequest::extract(&state, action, body)?;
    let format = NoteFormat::parse_or_default(req.opt_str("format"));
    let result = req.assistant
        .notes(&req.input, format)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}

/// POST /api/ai/questions
pub async fn questions(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Questions;
    let req = AssistRequest::extract(&state, action, body)?;
    let kind = QuestionKind::parse_or_default(req.opt_str("type"));
    let count = prompts::question_count(req.opt_u64("count"));
    let result = req.assistant
        .questions(&req.input, kind, count)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}

/// POST /api/ai/paraphrase
pub async fn paraphrase(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Paraphrase;
    let req = AssistRequest::extract(&state, action, body)?;
    let style = ParaphraseStyle::parse_or_default(req.opt_str("style"));
    let result = req.assistant
        .paraphrase(&req.input, style)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}

/// POST /api/ai/cheatsheet
pub async fn cheatsheet(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::CheatSheet;
    let req = AssistRequest::extract(&state, action, body)?;
    let level = req.opt_str("level").and_then(Level::parse).unwrap_or(Level::Intermediate);
    let result = req.assistant
        .cheat_sheet(&req.input, level)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}

/// POST /api/ai/explain
pub async fn explain(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let action = AssistAction::Explain;
    let req = AssistRequest::extract(&state, action, body)?;
    let level = Level::parse_or_default(req.opt_str("level"));
    let result = req.assistant
        .explain(&req.input, level)
        .await
        .map_err(|e| action.upstream_failure(e))?;
    Ok(Json(json!({ "result": result })))
}
