//! Employee validation schema
//!
//! The single canonical copy of the field rules, used by the server handlers
//! and by client-side forms. Given a candidate record it returns either the
//! normalized record or the list of field-level violations.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::models::{EmployeeCreate, EmployeeUpdate};

// ── Text length limits ──────────────────────────────────────────────

/// Minimum length for name / position (after trim)
pub const MIN_TEXT_LEN: usize = 2;

/// Maximum length for name / position
pub const MAX_TEXT_LEN: usize = 100;

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Normalize an email for storage and uniqueness comparison
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate a trimmed name/position-style text field
fn validate_text(value: &str, field: &str, errors: &mut Vec<FieldError>) {
    let label = capitalize(field);
    if value.chars().count() < MIN_TEXT_LEN {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least {MIN_TEXT_LEN} characters"),
        ));
    } else if value.chars().count() > MAX_TEXT_LEN {
        errors.push(FieldError::new(
            field,
            format!("{label} must be less than {MAX_TEXT_LEN} characters"),
        ));
    }
}

fn validate_email(value: &str, errors: &mut Vec<FieldError>) {
    if !value.validate_email() {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Validate a create payload, returning the normalized record
pub fn validate_create(input: &EmployeeCreate) -> Result<EmployeeCreate, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = input.name.trim().to_string();
    let email = normalize_email(&input.email);
    let position = input.position.trim().to_string();

    validate_text(&name, "name", &mut errors);
    validate_email(&email, &mut errors);
    validate_text(&position, "position", &mut errors);

    if errors.is_empty() {
        Ok(EmployeeCreate {
            name,
            email,
            position,
        })
    } else {
        Err(errors)
    }
}

/// Validate an update payload — only supplied fields are checked/normalized
pub fn validate_update(input: &EmployeeUpdate) -> Result<EmployeeUpdate, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = input.name.as_deref().map(|n| n.trim().to_string());
    let email = input.email.as_deref().map(normalize_email);
    let position = input.position.as_deref().map(|p| p.trim().to_string());

    if let Some(ref n) = name {
        validate_text(n, "name", &mut errors);
    }
    if let Some(ref e) = email {
        validate_email(e, &mut errors);
    }
    if let Some(ref p) = position {
        validate_text(p, "position", &mut errors);
    }

    if errors.is_empty() {
        Ok(EmployeeUpdate {
            name,
            email,
            position,
        })
    } else {
        Err(errors)
    }
}
