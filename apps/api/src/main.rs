mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::interview::interviewer::{Interviewer, LlmInterviewer, OfflineInterviewer};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careero API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client and pick the interviewer backend
    let llm = match &config.llm {
        Some(primary) => {
            let client = LlmClient::new(primary.clone(), config.llm_fallback.clone())
                .context("Failed to build LLM HTTP client")?;
            info!(
                "LLM client initialized (model: {}, fallback: {})",
                client.model(),
                client.has_fallback()
            );
            Some(client)
        }
        None => {
            warn!("LLM_API_KEY not set: using offline interviewer, resume analysis disabled");
            None
        }
    };

    let interviewer: Arc<dyn Interviewer> = match &llm {
        Some(client) => Arc::new(LlmInterviewer(client.clone())),
        None => Arc::new(OfflineInterviewer),
    };

    // Build app state
    let state = AppState {
        db,
        llm,
        config: config.clone(),
        interviewer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the client origin once it is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
