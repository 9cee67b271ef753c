//! Per-client rate limiting middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_governor::key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor};

use crate::error::AppError;
use crate::infrastructure::rate_limit::{RateLimiter, RateScope};
use crate::state::AppState;

/// Client identity used when no address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// State for one rate-limited route group.
#[derive(Clone)]
pub struct RateLimitContext {
    limiter: Arc<dyn RateLimiter>,
    scope: RateScope,
    behind_proxy: bool,
}

impl RateLimitContext {
    pub fn new(state: &AppState, scope: RateScope, behind_proxy: bool) -> Self {
        Self {
            limiter: state.limiter.clone(),
            scope,
            behind_proxy,
        }
    }
}

/// Admits or rejects a request against its scope budget and the daily budget.
///
/// # Key Extraction
///
/// Budgets are kept per client IP address, taken from the socket peer
/// address, or from `X-Forwarded-For` / `X-Real-IP` when `behind_proxy` is set.
/// Requests without a resolvable address share the `unknown` budget.
///
/// # Errors
///
/// Returns `429 Too Many Requests` with
/// `{"error": "Rate limit exceeded", "message": ...}` when a budget is spent.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = RateLimitContext::new(&state, RateScope::Single, false);
/// let routes = Router::new()
///     .route("/", get(check_handler))
///     .route_layer(middleware::from_fn_with_state(ctx, rate_limit::layer));
/// ```
pub async fn layer(
    State(ctx): State<RateLimitContext>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_key(&req, ctx.behind_proxy);

    if let Err(e) = ctx.limiter.check(ctx.scope, &client).await {
        tracing::info!(client = %client, scope = %ctx.scope, limit = %e, "Rate limit exceeded");
        metrics::counter!("rate_limit_rejections_total", "scope" => ctx.scope.to_string())
            .increment(1);
        return Err(e.into());
    }

    Ok(next.run(req).await)
}

/// Extracts the client identity for rate limiting.
pub fn client_key<T>(req: &axum::http::Request<T>, behind_proxy: bool) -> String {
    let ip = if behind_proxy {
        SmartIpKeyExtractor.extract(req)
    } else {
        PeerIpKeyExtractor.extract(req)
    };

    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|_| UNKNOWN_CLIENT.to_string())
}
