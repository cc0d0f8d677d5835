//! Input Validation
//!
//! Turns caller-supplied labels and numbers into typed decision-engine inputs
//! and applies the presentation range on hours since the last alert.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{RawEvaluationInput, ValidatedInput, ValidationConfig, Validator};
