//! Documentation route configuration.

use crate::state::AppState;
use crate::web::handlers::{docs_handler, openapi_handler};
use axum::{Router, routing::get};

/// Public documentation routes, exempt from rate limits.
///
/// # Endpoints
///
/// - `GET /docs` - HTML API reference
/// - `GET /openapi.json` - OpenAPI 3.0.3 document
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(docs_handler))
        .route("/openapi.json", get(openapi_handler))
}
