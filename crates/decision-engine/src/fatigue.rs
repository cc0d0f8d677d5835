//! Alert fatigue classification

use crate::error::DecisionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Below this many hours the user was alerted very recently
pub const RECENT_ALERT_HOURS: f64 = 1.0;
/// Above this many hours fatigue has worn off
pub const RESTED_AFTER_HOURS: f64 = 4.0;

/// How saturated the user is with alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    High,
    Medium,
    Low,
}

impl FatigueLevel {
    /// Every fatigue level, most fatigued first
    pub const ALL: [FatigueLevel; 3] = [FatigueLevel::High, FatigueLevel::Medium, FatigueLevel::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            FatigueLevel::High => "high",
            FatigueLevel::Medium => "medium",
            FatigueLevel::Low => "low",
        }
    }
}

impl fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket the hours since the last alert into a fatigue level
///
/// - `hours < 1` is HIGH
/// - `1 <= hours <= 4` is MEDIUM
/// - `hours > 4` is LOW
///
/// There is no upper bound. Negative and NaN inputs are rejected.
pub fn classify_fatigue(hours: f64) -> Result<FatigueLevel, DecisionError> {
    if hours.is_nan() {
        return Err(DecisionError::invalid(
            "hours_since_last_alert",
            "value is not a number",
        ));
    }
    if hours < 0.0 {
        return Err(DecisionError::invalid(
            "hours_since_last_alert",
            format!("{} is negative", hours),
        ));
    }

    let level = if hours < RECENT_ALERT_HOURS {
        FatigueLevel::High
    } else if hours <= RESTED_AFTER_HOURS {
        FatigueLevel::Medium
    } else {
        FatigueLevel::Low
    };

    trace!(hours, fatigue = level.as_str(), "Classified alert fatigue");
    Ok(level)
}
