mod agent;
mod config;
mod errors;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use tracing::info;

use crate::agent::OllamaAgentService;
use crate::config::AppConfig;
use crate::routes::build_router;
use crate::service::chat_service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brain_teasers=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let agent = OllamaAgentService::new(&config)?;
    info!(model = %config.model, host = %config.ollama_base_url, "Using Ollama agent");
    let chat_service = ChatService::new(Arc::new(agent));

    let app = build_router(chat_service, config.cors_allowed_origin.as_deref());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
