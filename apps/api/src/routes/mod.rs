pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::analysis::handlers;
use crate::state::AppState;

/// Builds the application router.
/// The fact-check route carries a per-IP rate limit derived from the
/// configured window/max pair; /health is left unthrottled.
pub fn build_router(state: AppState) -> Router {
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(state.config.rate_limit_replenish_ms())
            .burst_size(state.config.rate_limit_max_requests)
            .use_headers()
            .finish()
            .expect("rate limiter configuration is valid"),
    );

    Router::new()
        .route("/api/jobs/fact-check", post(handlers::handle_fact_check))
        .route_layer(GovernorLayer {
            config: governor_config,
        })
        .route("/health", get(health::health_handler))
        .with_state(state)
}
