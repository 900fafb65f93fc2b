//! HTTP handlers for all API routes.

pub mod ai;
pub mod tools;
