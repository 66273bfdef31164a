//! Unified Error Handling
//!
//! Application-level error type mapped onto the API envelope:
//! - [`AppError::Validation`] → 400 with field errors
//! - [`AppError::Conflict`] → 400 (duplicate email)
//! - [`AppError::NotFound`] → 404
//! - [`AppError::Database`] / [`AppError::Internal`] → 500, detail logged and
//!   only exposed in the body outside production

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::db::repository::RepoError;
use shared::response::ApiResponse;
use shared::validation::FieldError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type for request handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Whether 500 responses may carry the underlying error detail
fn expose_detail() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| env != "production")
        .unwrap_or(true)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::error(msg)),

            // The wire contract maps duplicate email to 400, not 409
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, ApiResponse::error(msg)),

            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::validation_error("Validation error", errors),
            ),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error_with_detail(
                        "Database error",
                        expose_detail().then_some(msg),
                    ),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error_with_detail(
                        "Internal server error",
                        expose_detail().then_some(msg),
                    ),
                )
            }
        };

        (status, Json::<ApiResponse<()>>(body)).into_response()
    }
}
