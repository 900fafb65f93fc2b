//! studykit-common — Shared types and errors used across all StudyKit crates.

pub mod error;
pub mod catalog;

// Re-export commonly used types
pub use catalog::{CategoryInfo, Tool, ToolCategory};
pub use error::{ApiError, StudykitError};
