//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Every handler maps its failure into exactly one of these variants; the
/// response body is always `{ "error": message }` with no internal detail.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input, invalid enum value
    #[error("{0}")]
    BadRequest(String),

    /// Missing/invalid/expired token or bad credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacking the specific ownership/membership right
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity absent, or a scoped lookup excludes the caller
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Unexpected store failure
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            // Never leak store details to clients.
            ApiError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a repository failure to `Conflict` when it carries a Postgres
/// unique-violation (SQLSTATE 23505), masking everything else as an
/// internal error. Lets insert paths stay race-safe without a pre-check.
pub fn conflict_on_unique(err: anyhow::Error, message: &str) -> ApiError {
    let unique_violation = err
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505");

    if unique_violation {
        ApiError::Conflict(message.to_string())
    } else {
        tracing::error!("Database operation failed: {}", err);
        ApiError::InternalServerError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InternalServerError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_on_unique_masks_non_unique_errors() {
        let err = anyhow::anyhow!("connection reset");
        let api_err = conflict_on_unique(err, "Email already registered");
        assert_eq!(api_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
