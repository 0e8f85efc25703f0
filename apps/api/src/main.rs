mod ats;
mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::ai_matcher::AiJobMatcher;
use crate::matching::keyword_matcher::KeywordJobMatcher;
use crate::matching::JobMatcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on inconsistent env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    let job_matcher = build_job_matcher(&config)?;
    info!("Job matcher initialized (backend: {})", job_matcher.backend());

    let state = AppState { job_matcher };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// KeywordJobMatcher by default; AiJobMatcher when ENABLE_AI_MATCHING is set.
fn build_job_matcher(config: &Config) -> Result<Arc<dyn JobMatcher>> {
    match (&config.anthropic_api_key, config.enable_ai_matching) {
        (Some(api_key), true) => {
            let llm = LlmClient::new(api_key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(AiJobMatcher::new(
                Arc::new(llm),
                Duration::from_millis(config.ai_batch_delay_ms),
            )))
        }
        _ => Ok(Arc::new(KeywordJobMatcher)),
    }
}
