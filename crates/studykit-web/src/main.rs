//! StudyKit Web Server
//!
//! Run with: cargo run -p studykit-web

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use studykit_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load()?;
    let state = studykit_web::state::AppState::from_config(&config)?;

    match &state.assistant {
        Some(assistant) => info!(model = assistant.model_id(), "AI service configured"),
        None => warn!("GEMINI_API_KEY not set; AI endpoints will return 503"),
    }

    let app = studykit_web::router::build_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
