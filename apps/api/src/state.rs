use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::interview::interviewer::Interviewer;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` when no provider key is configured.
    pub llm: Option<LlmClient>,
    pub config: Config,
    /// Pluggable interviewer. LLM-backed when a provider is configured, offline otherwise.
    pub interviewer: Arc<dyn Interviewer>,
}
