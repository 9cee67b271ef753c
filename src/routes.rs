//! Top-level router configuration combining API and documentation routes.
//!
//! # Route Structure
//!
//! - `GET  /`             - Single domain check (`single` + `daily` budgets)
//! - `POST /bulk`         - Bulk check (`bulk` + `daily` budgets)
//! - `GET  /health`       - Liveness check (exempt)
//! - `GET  /metrics`      - Uptime, cache stats, limits (exempt)
//! - `GET  /docs`         - HTML API reference (exempt)
//! - `GET  /openapi.json` - OpenAPI document (exempt)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client budgets (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::rate_limit::{self, RateLimitContext};
use crate::api::middleware::tracing;
use crate::infrastructure::rate_limit::RateScope;
use crate::state::AppState;
use crate::web;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let check_router = api::routes::check_routes().route_layer(middleware::from_fn_with_state(
        RateLimitContext::new(&state, RateScope::Single, behind_proxy),
        rate_limit::layer,
    ));

    let bulk_router = api::routes::bulk_routes().route_layer(middleware::from_fn_with_state(
        RateLimitContext::new(&state, RateScope::Bulk, behind_proxy),
        rate_limit::layer,
    ));

    let router = Router::new()
        .merge(check_router)
        .merge(bulk_router)
        .merge(api::routes::exempt_routes())
        .merge(web::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
