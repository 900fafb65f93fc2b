//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    compression::CompressionLayer,
    trace::TraceLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    ai::{ai_status, summarize, essay, grammar, notes, questions, paraphrase, cheatsheet, explain},
    tools::{api_tools, api_tool_detail, api_categories},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let shared: SharedState = Arc::new(state);

    Router::new()
        // AI proxy
        .route("/api/ai/status",     get(ai_status))
        .route("/api/ai/summarize",  post(summarize))
        .route("/api/ai/essay",      post(essay))
        .route("/api/ai/grammar",    post(grammar))
        .route("/api/ai/notes",      post(notes))
        .route("/api/ai/questions",  post(questions))
        .route("/api/ai/paraphrase", post(paraphrase))
        .route("/api/ai/cheatsheet", post(cheatsheet))
        .route("/api/ai/explain",    post(explain))

        // Tool catalog
        .route("/api/tools",         get(api_tools))
        .route("/api/tools/{id}",    get(api_tool_detail))
        .route("/api/categories",    get(api_categories))

        // Client bundle
        .fallback_service(static_files)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
