//! API route modules
//!
//! - [`health`] - health check
//! - [`employees`] - employee CRUD

pub mod employees;
pub mod health;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
