mod analysis;
mod config;
mod documents;
mod errors;
mod llm_client;
mod report;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisClient;
use crate::config::Config;
use crate::llm_client::GeminiBackend;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unusable overrides)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_some() {
        info!("Using Gemini API key from secrets");
    } else {
        warn!("GEMINI_API_KEY not set; a key must be entered manually before analyzing");
    }

    // Initialize analysis client
    let backend = Arc::new(GeminiBackend::new(config.gemini_api_base.clone()));
    let analysis = AnalysisClient::new(backend, config.model_candidates.clone());
    info!(
        "Analysis client initialized (candidates: {})",
        config.model_candidates.join(", ")
    );
    info!("Loaded {} stop words", config.stop_words.len());

    let port = config.port;
    let state = AppState::new(config, analysis);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
