//! Decision Engine Error Types

use thiserror::Error;

/// Errors raised by the decision pipeline
///
/// The engine has a single failure mode: an argument outside its declared
/// enumeration or numeric domain. It is raised by the first stage that sees
/// the bad value and is never recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    /// Argument outside its enumeration or numeric domain
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },
}

impl DecisionError {
    /// Shorthand for building an `InvalidInput`
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DecisionError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending argument
    pub fn field(&self) -> &'static str {
        match self {
            DecisionError::InvalidInput { field, .. } => field,
        }
    }
}
