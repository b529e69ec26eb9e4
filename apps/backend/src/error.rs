//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use betukereso_core::EngineError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Engine(EngineError::InsufficientPoolSize { .. }) => {
                (StatusCode::BAD_REQUEST, "insufficient_pool")
            }
            ApiError::Engine(EngineError::InvalidEvaluatorInput(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_input")
            }
            ApiError::Engine(EngineError::InvalidSettings(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_settings")
            }
            ApiError::Engine(EngineError::InvalidName(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_name")
            }
            ApiError::Engine(EngineError::PersistenceUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "persistence_unavailable")
            }
            ApiError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => (StatusCode::SERVICE_UNAVAILABLE, "persistence_unavailable"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            ApiError::Migration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "migration_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("child 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_engine_input_errors_are_bad_requests() {
        let errors = [
            EngineError::InsufficientPoolSize {
                requested: 60,
                available: 46,
            },
            EngineError::InvalidEvaluatorInput("empty".to_string()),
            EngineError::InvalidSettings("letters_per_session".to_string()),
            EngineError::InvalidName("empty".to_string()),
        ];
        for error in errors {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_persistence_unavailable_status() {
        let error = ApiError::from(EngineError::PersistenceUnavailable("down".to_string()));
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let error = ApiError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_database_error_status() {
        let error = ApiError::Database(sqlx::Error::RowNotFound);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ApiError::NotFound("Child 123".to_string());
        assert_eq!(error.to_string(), "Not found: Child 123");
    }

    #[test]
    fn test_error_display_engine() {
        let error = ApiError::from(EngineError::InvalidName("too long".to_string()));
        assert_eq!(error.to_string(), "invalid name: too long");
    }
}
