//! Handler for the single domain check endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use validator::Validate;

use crate::api::dto::check::{CheckParams, DomainCheckResponse};
use crate::domain::entities::DomainQuery;
use crate::error::{AppError, INVALID_REQUEST};
use crate::state::AppState;

/// Checks whether one domain is available for registration.
///
/// # Endpoint
///
/// `GET /?domain={label}&tld={tld}`
///
/// # Query Parameters
///
/// - `domain` (required): single label, e.g. `example`
/// - `tld` (optional, default `com`): suffix with or without the leading dot
///
/// # Response
///
/// ```json
/// {
///   "domain": "example.com",
///   "status": "taken",
///   "whois": {
///     "status": "taken",
///     "details": {
///       "registrar": "RESERVED-Internet Assigned Numbers Authority",
///       "expiration_date": "2025-08-13"
///     }
///   },
///   "dns": { "status": "taken", "records": ["93.184.216.34"] },
///   "tld": "com",
///   "response_time": "0.45s",
///   "cached": false
/// }
/// ```
///
/// A probe that failed or timed out reports `"status": "error"` with an
/// `error` field; the overall `status` is still decided.
///
/// # Errors
///
/// Returns 400 Bad Request for a missing domain, an invalid label or an
/// invalid TLD.
pub async fn check_handler(
    State(state): State<AppState>,
    params: Result<Query<CheckParams>, QueryRejection>,
) -> Result<Json<DomainCheckResponse>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::bad_request(INVALID_REQUEST, e.body_text()))?;
    params.validate()?;

    let query = DomainQuery::parse(
        params.domain.as_deref().unwrap_or_default(),
        params.tld.as_deref(),
    )?;

    let result = state.checker.check(&query).await;

    Ok(Json(DomainCheckResponse::from(&result)))
}
