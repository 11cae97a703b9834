use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;

/// Shared application state injected into route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The external model gateway, behind a trait object so tests can
    /// substitute a fake without process-level mocking.
    pub gateway: Arc<dyn ModelGateway>,
    pub config: Config,
}
