//! Error Handling Module
//!
//! Maps service errors onto HTTP status codes. Storage failures are logged
//! with full detail but reported to clients without internals.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::WellError;
use crate::validation::ValidationErrors;

/// API error type
///
/// # Design Decision
///
/// - malformed body / validation / bad id: 400, validation with per-field details
/// - not found: 404
/// - calculation rejected the inputs: 422
/// - store timed out: 503
/// - any other store failure: 500
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 400 Bad Request ============
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    ValidationError(ValidationErrors),

    // ============ 404 Not Found ============
    #[error("Resource not found: {0}")]
    NotFound(String),

    // ============ 422 Unprocessable Entity ============
    #[error("Calculation failed: {0}")]
    CalculationFailed(String),

    // ============ 500 Internal Server Error ============
    #[error("Database error: {0}")]
    DatabaseError(String),

    // ============ 503 Service Unavailable ============
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::CalculationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details) = match &self {
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg.clone(), None),
            ApiError::ValidationError(errors) => (
                "VALIDATION_ERROR",
                "Validation failed".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            ApiError::NotFound(resource) => ("NOT_FOUND", format!("{} not found", resource), None),
            ApiError::CalculationFailed(msg) => (
                "CALCULATION_FAILED",
                "Well parameters rejected by calculation".to_string(),
                Some(serde_json::Value::String(msg.clone())),
            ),

            // 5xx: no internals in the body
            ApiError::DatabaseError(_) => {
                tracing::error!("Database error: {:?}", self);
                ("DATABASE_ERROR", "Database error occurred".to_string(), None)
            }
            ApiError::ServiceUnavailable(_) => {
                tracing::warn!("Service unavailable: {:?}", self);
                (
                    "SERVICE_UNAVAILABLE",
                    "Database is currently unavailable".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<WellError> for ApiError {
    fn from(err: WellError) -> Self {
        match err {
            WellError::Validation(errors) => ApiError::ValidationError(errors),
            WellError::InvalidId(id) => ApiError::BadRequest(format!("invalid well id: {id}")),
            WellError::NotFound(id) => ApiError::NotFound(format!("Well {id}")),
            WellError::Calculation { source, .. } => ApiError::CalculationFailed(source.to_string()),
            err @ WellError::Repository { .. } if err.is_not_found() => {
                ApiError::NotFound("Well".to_string())
            }
            err @ WellError::Repository {
                source: RepositoryError::Timeout(_),
                ..
            } => ApiError::ServiceUnavailable(err.to_string()),
            err @ WellError::Repository { .. } => ApiError::DatabaseError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CalculationError;
    use crate::validation::Validator;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let mut v = Validator::new();
        v.add_error("name", "required");
        let validation = WellError::Validation(v.finish().unwrap_err());

        let cases = [
            (validation, StatusCode::BAD_REQUEST),
            (WellError::InvalidId(0), StatusCode::BAD_REQUEST),
            (WellError::NotFound(4), StatusCode::NOT_FOUND),
            (
                WellError::Calculation {
                    operation: "create_well",
                    source: CalculationError::RangeExceeded(1500.0),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WellError::Repository {
                    operation: "list_wells",
                    id: None,
                    source: RepositoryError::NotFound,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                WellError::Repository {
                    operation: "list_wells",
                    id: None,
                    source: RepositoryError::Timeout(Duration::from_secs(5)),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                WellError::Repository {
                    operation: "create_well",
                    id: None,
                    source: RepositoryError::Database(sqlx::Error::PoolClosed),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status(), expected, "{api:?}");
            assert_eq!(api.into_response().status(), expected);
        }
    }
}
