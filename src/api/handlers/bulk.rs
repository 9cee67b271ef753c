//! Handler for the bulk check endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::bulk::{BulkCheckRequest, BulkCheckResponse};
use crate::error::{AppError, INVALID_REQUEST};
use crate::state::AppState;

/// Checks several labels under one TLD.
///
/// # Endpoint
///
/// `POST /bulk`
///
/// # Request Body
///
/// ```json
/// {
///   "domains": ["example", "surely-unregistered-123"],
///   "tld": "com"
/// }
/// ```
///
/// # Batch Processing
///
/// Labels are checked concurrently; results come back in input order.
/// An invalid label does not fail the batch, its slot reads:
///
/// ```json
/// { "domain": "bad label.com", "status": "error", "error": "Invalid domain name format" }
/// ```
///
/// # Response
///
/// ```json
/// { "results": [ { "domain": "example.com", "status": "taken", "...": "..." } ] }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON of the shape above,
/// the batch exceeds `MAX_BULK_DOMAINS`, or the TLD is invalid. Nothing is
/// probed in these cases.
pub async fn bulk_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkCheckRequest>, JsonRejection>,
) -> Result<Json<BulkCheckResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request(
            INVALID_REQUEST,
            format!("Request body must be JSON with a 'domains' list: {}", e.body_text()),
        )
    })?;

    let items = state
        .bulk
        .check_many(&payload.domains, payload.tld.as_deref())
        .await?;

    Ok(Json(BulkCheckResponse::from(items.as_slice())))
}
