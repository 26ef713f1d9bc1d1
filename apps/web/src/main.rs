mod analysis;
mod config;
mod errors;
mod llm_client;
mod report;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::SurveyAnalyzer;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing API key stops startup here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Survey Insight v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion client once and inject it into the analyzer
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        config.gemini_timeout,
    )?;
    info!("LLM client initialized (model: {})", config.gemini_model);
    let analyzer = SurveyAnalyzer::new(Arc::new(gemini));

    let sessions = SessionStore::new(config.max_sessions);
    match config.max_upload_bytes {
        Some(limit) => info!("Upload limit: {limit} bytes"),
        None => info!("Upload limit: none"),
    }

    let state = AppState {
        config: config.clone(),
        sessions,
        analyzer,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
