//! studykit-web — HTTP backend for the StudyKit site.
//! Provides:
//!   - AI proxy endpoints (status + eight study actions)
//!   - Tool catalog listing and search
//!   - Static hosting of the built client bundle

pub mod router;
pub mod handlers;
pub mod state;
