//! studykit-llm — generative-model access for the AI study tools.
//! Holds the LlmBackend trait, the Gemini backend, prompt builders and the
//! Assistant that runs each study action against a backend.

pub mod backend;
pub mod prompts;
pub mod assistant;
pub mod audit;

pub use assistant::{Assistant, GrammarReport};
pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message};
