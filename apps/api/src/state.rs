use std::sync::Arc;

use crate::assessment::questions::QuestionBank;
use crate::assessment::store::SessionStore;
use crate::config::Config;
use crate::enrichment::Enricher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub bank: Arc<QuestionBank>,
    pub sessions: SessionStore,
    /// Optional enrichment collaborator. `None` when no API key is configured.
    pub enricher: Option<Arc<dyn Enricher>>,
}
