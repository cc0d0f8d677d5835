//! Validation Error Types

use decision_engine::DecisionError;
use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value outside the presentation range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Configured range is empty, inverted, or unbounded
    #[error("{field} [{min}, {max}] is not a usable range")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Rejected by the decision engine
    #[error(transparent)]
    InvalidInput(#[from] DecisionError),
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::InvalidRange { field, .. } => field,
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidInput(err) => err.field(),
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::InvalidRange { .. } => "invalid_range",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidInput(_) => "invalid_input",
        }
    }
}
