//! Validation error types

use std::fmt;

/// Validation error for request payloads and domain models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds its maximum length
    TooLong { field: &'static str, max: usize },

    /// Field doesn't match the required shape
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value is not one of the allowed variants
    InvalidVariant { field: &'static str, value: String },

    /// Numeric field must not be negative
    Negative { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} is required"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::InvalidFormat { field, reason } => write!(f, "{field}: {reason}"),
            Self::InvalidVariant { field, value } => {
                write!(f, "'{value}' is not a valid {field}")
            }
            Self::Negative { field } => write!(f, "{field} must not be negative"),
        }
    }
}

impl std::error::Error for ValidationError {}
