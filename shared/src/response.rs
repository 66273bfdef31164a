//! API Response types
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! {
//!     "success": true,
//!     "message": "Employee created successfully",
//!     "data": { ... },
//!     "count": 3,
//!     "errors": [ ... ]
//! }
//! ```
//!
//! `message`, `data`, `count` and `errors` are omitted when absent.

use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

/// Unified API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Item count for list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Field-level validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Underlying error detail, only populated outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
            errors: None,
            error: None,
        }
    }

    /// Successful response with data and a custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            count: None,
            errors: None,
            error: None,
        }
    }

    /// Successful message-only response (e.g. after a delete)
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            count: None,
            errors: None,
            error: None,
        }
    }

    /// Error response with a message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
            errors: None,
            error: None,
        }
    }

    /// Error response with an optional underlying detail string
    pub fn error_with_detail(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
            errors: None,
            error: detail,
        }
    }

    /// Error response carrying field-level validation errors
    pub fn validation_error(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
            errors: Some(errors),
            error: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful list response; `count` mirrors the list length
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            count: Some(items.len()),
            data: Some(items),
            errors: None,
            error: None,
        }
    }
}
