mod assessment;
mod config;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::questions::QuestionBank;
use crate::assessment::store::{spawn_idle_sweeper, SessionStore};
use crate::config::Config;
use crate::enrichment::{Enricher, LlmEnricher};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ZeroStage API v{}", env!("CARGO_PKG_VERSION"));

    let bank = Arc::new(QuestionBank::canonical());
    info!(
        "Question bank loaded: {} questions, slider policy {:?}",
        bank.len(),
        config.slider_policy
    );

    let enricher = build_enricher(&config)?;

    let sessions = SessionStore::new();
    spawn_idle_sweeper(sessions.clone(), config.session_idle_ttl);
    info!(
        "Idle sessions expire after {}s",
        config.session_idle_ttl.as_secs()
    );

    let state = AppState {
        config: config.clone(),
        bank,
        sessions,
        enricher,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the enrichment backend. Without an API key the service runs with
/// local scoring only.
fn build_enricher(config: &Config) -> Result<Option<Arc<dyn Enricher>>> {
    match config.enrichment_key() {
        Some(key) => {
            let client = LlmClient::new(key.to_string())?;
            info!("Enrichment enabled (model: {})", llm_client::MODEL);
            Ok(Some(Arc::new(LlmEnricher(client))))
        }
        None => {
            warn!("Enrichment disabled: ANTHROPIC_API_KEY not set or ENRICHMENT_ENABLED=false");
            Ok(None)
        }
    }
}
