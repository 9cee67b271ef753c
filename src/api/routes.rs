//! API route configuration.
//!
//! Routes are grouped by rate limit budget so [`crate::routes::app_router`]
//! can layer each group separately.

use crate::api::handlers::{bulk_handler, check_handler, health_handler, metrics_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Single checks, drawing from the `single` budget.
///
/// - `GET /` - Check one domain
pub fn check_routes() -> Router<AppState> {
    Router::new().route("/", get(check_handler))
}

/// Bulk checks, drawing from the `bulk` budget.
///
/// - `POST /bulk` - Check up to `MAX_BULK_DOMAINS` labels under one TLD
pub fn bulk_routes() -> Router<AppState> {
    Router::new().route("/bulk", post(bulk_handler))
}

/// Operational endpoints, exempt from rate limits.
///
/// - `GET /health`  - Liveness and cache check
/// - `GET /metrics` - Uptime, cache counters, active limits
pub fn exempt_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}
