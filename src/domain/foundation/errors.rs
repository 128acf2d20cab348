//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' needs at least {min} entries, got {actual}")]
    TooFewItems {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a too-few-items validation error.
    pub fn too_few_items(field: impl Into<String>, min: usize, actual: usize) -> Self {
        ValidationError::TooFewItems {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooFewItems { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Applies [`require_text`] to every entry, naming entries as `field[i]`.
pub(crate) fn require_text_items(
    field: &str,
    values: Vec<String>,
) -> Result<Vec<String>, ValidationError> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| require_text(&format!("{}[{}]", field, i), value))
        .collect()
}

/// Rejects `value` when it is blank, but returns it unchanged.
pub(crate) fn require_non_blank(field: &str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

/// Applies [`require_non_blank`] to every entry, naming entries as `field[i]`.
pub(crate) fn require_non_blank_items(
    field: &str,
    values: Vec<String>,
) -> Result<Vec<String>, ValidationError> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| require_non_blank(&format!("{}[{}]", field, i), value))
        .collect()
}
