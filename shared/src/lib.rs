//! Shared types for the employee directory
//!
//! Common types used across the server and client crates: the domain model,
//! the canonical validation schema and the API response envelope.

pub mod models;
pub mod response;
pub mod validation;

// Re-exports
pub use models::{Employee, EmployeeCreate, EmployeeUpdate};
pub use response::ApiResponse;
pub use validation::FieldError;
