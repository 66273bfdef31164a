//! Client error types

use thiserror::Error;

use shared::validation::FieldError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Field-level validation errors
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Request rejected by the server (e.g. duplicate email)
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Server-side error
    #[error("Server error: {0}")]
    Server(String),
}

impl ClientError {
    /// Human-readable message suitable for a toast notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(e) if e.is_connect() || e.is_timeout() => {
                "Unable to connect to server. Please check your connection.".to_string()
            }
            ClientError::Http(_) | ClientError::InvalidResponse(_) => {
                "An error occurred".to_string()
            }
            ClientError::NotFound(msg)
            | ClientError::Rejected(msg)
            | ClientError::Server(msg) => msg.clone(),
            ClientError::Validation(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Validation error".to_string()),
        }
    }

    /// Field errors carried by a validation failure, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
