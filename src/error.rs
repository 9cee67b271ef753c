//! HTTP-facing error type.
//!
//! Every user-visible failure is rendered as `{"error": ..., "message": ...}`.

use crate::application::services::BulkError;
use crate::domain::entities::QueryError;
use crate::infrastructure::rate_limit::RateLimitError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `error` value shared by every 400 response.
pub const INVALID_REQUEST: &str = "Invalid request";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation { error: String, message: String },
    TooManyDomains { message: String },
    RateLimited { message: String },
}

impl AppError {
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::TooManyDomains { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::bad_request(INVALID_REQUEST, e.to_string())
    }
}

impl From<BulkError> for AppError {
    fn from(e: BulkError) -> Self {
        match e {
            BulkError::TooManyDomains { .. } => AppError::TooManyDomains {
                message: e.to_string(),
            },
            BulkError::InvalidTld(reason) => reason.into(),
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(e: RateLimitError) -> Self {
        AppError::rate_limited(format!("Limit of {e} reached, try again later"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| e.to_string());

        AppError::bad_request(INVALID_REQUEST, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation { error, message } => ErrorBody { error, message },
            AppError::TooManyDomains { message } => ErrorBody {
                error: INVALID_REQUEST.to_string(),
                message,
            },
            AppError::RateLimited { message } => ErrorBody {
                error: "Rate limit exceeded".to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::rate_limit::RateRule;

    #[test]
    fn test_query_errors_are_bad_requests() {
        let error: AppError = QueryError::MissingDomain.into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);

        match error {
            AppError::Validation { error, message } => {
                assert_eq!(error, INVALID_REQUEST);
                assert_eq!(message, "Missing domain parameter");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bulk_errors_map_to_400() {
        let too_many: AppError = BulkError::TooManyDomains { count: 11, max: 10 }.into();
        assert_eq!(too_many.status(), StatusCode::BAD_REQUEST);

        let bad_tld: AppError = BulkError::InvalidTld(QueryError::InvalidTld).into();
        assert_eq!(bad_tld.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rate_limit_maps_to_429() {
        let rule: RateRule = "10 per minute".parse().unwrap();
        let error: AppError = RateLimitError::Exceeded(rule).into();

        assert_eq!(error.status(), StatusCode::TOO_MANY_REQUESTS);
        match error {
            AppError::RateLimited { message } => assert!(message.contains("10 per minute")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
