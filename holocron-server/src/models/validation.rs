//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or empty
    Empty { field: &'static str },

    /// String doesn't match the required format
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a path segment as a row id.
///
/// Ids are non-negative 32-bit integers in canonical decimal form: ASCII
/// digits only, no sign, no leading zeros. Anything else is rejected before
/// touching storage.
pub fn parse_row_id(raw: &str) -> Result<i32, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "id" });
    }

    let invalid = ValidationError::InvalidFormat {
        field: "id",
        reason: "must be a non-negative integer",
    };

    let digits_only = raw.bytes().all(|b| b.is_ascii_digit());
    let leading_zero = raw.len() > 1 && raw.starts_with('0');
    if !digits_only || leading_zero {
        return Err(invalid);
    }

    raw.parse::<i32>().map_err(|_| invalid)
}
