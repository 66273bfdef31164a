//! Typed client for the employee directory REST API
//!
//! Wraps the HTTP endpoints and normalizes error responses into
//! [`ClientError`], so callers branch on a tagged result instead of raw
//! status codes.

pub mod error;
pub mod http;

pub use error::{ClientError, ClientResult};
pub use http::DirectoryClient;

// Re-export the wire types callers need
pub use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
pub use shared::validation::FieldError;
