//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service liveness plus a cache backend check.
///
/// # Endpoint
///
/// `GET /health` (exempt from rate limits)
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "version": "0.1.0",
///   "checks": {
///     "cache": { "status": "ok", "message": "redis reachable" }
///   }
/// }
/// ```
///
/// Always 200: an unreachable cache only degrades to probing every request.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.checker.cache();
    let backend = cache.backend();

    let cache_check = if cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{backend} reachable")),
        }
    } else {
        CheckStatus {
            status: "degraded".to_string(),
            message: Some(format!("{backend} unreachable, serving uncached")),
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { cache: cache_check },
    })
}
