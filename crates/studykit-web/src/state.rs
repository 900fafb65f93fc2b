//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use studykit_config::Config;
use studykit_llm::{Assistant, GeminiBackend, LlmError};

/// Shared state injected into every Axum handler. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no model credential is configured.
    pub assistant: Option<Assistant>,
    /// Directory holding the built client bundle.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(assistant: Option<Assistant>, static_dir: impl Into<PathBuf>) -> Self {
        Self { assistant, static_dir: static_dir.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let assistant = GeminiBackend::from_config(&config.llm)?
            .map(|backend| Assistant::new(Arc::new(backend)));
        Ok(Self::new(assistant, config.server.static_dir.clone()))
    }

    pub fn is_configured(&self) -> bool {
        self.assistant.is_some()
    }
}

pub type SharedState = Arc<AppState>;
