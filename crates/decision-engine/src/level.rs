//! Severity and area risk levels, and the risk score derived from them

use crate::error::DecisionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest attainable risk score (LOW + LOW)
pub const MIN_RISK_SCORE: u8 = 2;
/// Highest attainable risk score (HIGH + HIGH)
pub const MAX_RISK_SCORE: u8 = 6;

/// Disaster severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Risk level of the geographic area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaRisk {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Every severity, weakest first
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Ordinal weight used in the risk score
    pub fn weight(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl AreaRisk {
    /// Every area risk, weakest first
    pub const ALL: [AreaRisk; 3] = [AreaRisk::Low, AreaRisk::Medium, AreaRisk::High];

    /// Ordinal weight used in the risk score
    pub fn weight(self) -> u8 {
        match self {
            AreaRisk::Low => 1,
            AreaRisk::Medium => 2,
            AreaRisk::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AreaRisk::Low => "low",
            AreaRisk::Medium => "medium",
            AreaRisk::High => "high",
        }
    }
}

fn unknown_level(field: &'static str, raw: &str) -> DecisionError {
    DecisionError::invalid(
        field,
        format!("'{}' is not one of low, medium, high", raw),
    )
}

impl FromStr for Severity {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(unknown_level("severity", s)),
        }
    }
}

impl FromStr for AreaRisk {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(AreaRisk::Low),
            "medium" => Ok(AreaRisk::Medium),
            "high" => Ok(AreaRisk::High),
            _ => Err(unknown_level("area_risk", s)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AreaRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined risk score, always in [2, 6]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = DecisionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&value) {
            Ok(RiskScore(value))
        } else {
            Err(DecisionError::invalid(
                "risk_score",
                format!(
                    "{} is outside [{}, {}]",
                    value, MIN_RISK_SCORE, MAX_RISK_SCORE
                ),
            ))
        }
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum the ordinal weights of severity and area risk
pub fn compute_risk_score(severity: Severity, area_risk: AreaRisk) -> RiskScore {
    // Both weights are in 1..=3, so the sum cannot leave [2, 6]
    RiskScore(severity.weight() + area_risk.weight())
}
