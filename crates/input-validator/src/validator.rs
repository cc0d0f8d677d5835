//! Validator for caller-supplied evaluation inputs

use crate::error::ValidationError;
use decision_engine::{evaluate, AreaRisk, DecisionError, Evaluation, Severity};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accepted hours since last alert (inclusive)
    pub hours_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            hours_range: (0.0, 24.0),
        }
    }
}

impl ValidationConfig {
    /// Narrow range used by the compact dashboard
    pub fn compact() -> Self {
        Self {
            hours_range: (0.0, 10.0),
        }
    }
}

/// Inputs as received from a caller, before any checking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvaluationInput {
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub area_risk: String,
    #[serde(default)]
    pub hours_since_last_alert: Option<f64>,
}

/// Inputs that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub severity: Severity,
    pub area_risk: AreaRisk,
    pub hours_since_last_alert: f64,
}

impl ValidatedInput {
    /// Run the decision pipeline on these inputs
    pub fn evaluate(&self) -> Result<Evaluation, DecisionError> {
        evaluate(self.severity, self.area_risk, self.hours_since_last_alert)
    }
}

/// Input validator
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator, rejecting an unusable hours range
    pub fn new(config: ValidationConfig) -> Result<Self, ValidationError> {
        let (min, max) = config.hours_range;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ValidationError::InvalidRange {
                field: "hours_range",
                min,
                max,
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate the hours since the last alert
    pub fn validate_hours(&self, hours: Option<f64>) -> Result<f64, ValidationError> {
        let hours = hours.ok_or(ValidationError::MissingField("hours_since_last_alert"))?;
        // Negative and NaN values are outside the engine's domain, not just the display range
        if hours.is_nan() {
            return Err(
                DecisionError::invalid("hours_since_last_alert", "value is not a number").into(),
            );
        }
        if hours < 0.0 {
            return Err(DecisionError::invalid(
                "hours_since_last_alert",
                format!("{} is negative", hours),
            )
            .into());
        }
        self.validate_range("hours_since_last_alert", hours, self.config.hours_range)?;
        Ok(hours)
    }

    /// Validate a severity label
    pub fn validate_severity(&self, raw: &str) -> Result<Severity, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::MissingField("severity"));
        }
        Ok(raw.parse()?)
    }

    /// Validate an area risk label
    pub fn validate_area_risk(&self, raw: &str) -> Result<AreaRisk, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::MissingField("area_risk"));
        }
        Ok(raw.parse()?)
    }

    /// Validate a full set of inputs, stopping at the first failure
    pub fn validate(&self, input: &RawEvaluationInput) -> Result<ValidatedInput, ValidationError> {
        let validated = ValidatedInput {
            severity: self.validate_severity(&input.severity)?,
            area_risk: self.validate_area_risk(&input.area_risk)?,
            hours_since_last_alert: self.validate_hours(input.hours_since_last_alert)?,
        };
        debug!("Validated input: {:?}", validated);
        Ok(validated)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }
}
