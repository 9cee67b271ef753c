//! Handler for the metrics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::metrics::{CacheStatsReport, MetricsResponse, RateLimitsReport};
use crate::state::AppState;
use crate::utils::uptime::format_uptime;

/// Reports uptime, cache counters and the active rate limits.
///
/// # Endpoint
///
/// `GET /metrics` (exempt from rate limits)
///
/// # Response
///
/// ```json
/// {
///   "uptime": "1d 2h 34m",
///   "cache_stats": {
///     "cache_hits": 42,
///     "cache_misses": 17,
///     "backend": "simple",
///     "ttl_seconds": 300
///   },
///   "rate_limits": {
///     "enabled": true,
///     "backend": "memory",
///     "single": "10 per minute",
///     "bulk": "5 per minute",
///     "daily": "100 per day"
///   }
/// }
/// ```
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    let stats = state.checker.cache_stats();
    let limits = state.limiter.limits();

    Json(MetricsResponse {
        uptime: format_uptime(state.started_at.elapsed()),
        cache_stats: CacheStatsReport {
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            backend: state.checker.cache().backend(),
            ttl_seconds: state.cache_ttl.as_secs(),
        },
        rate_limits: RateLimitsReport {
            enabled: limits.is_some(),
            backend: state.limiter.backend(),
            single: limits.map(|l| l.single),
            bulk: limits.map(|l| l.bulk),
            daily: limits.map(|l| l.daily),
        },
    })
}
