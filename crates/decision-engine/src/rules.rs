//! Decision rules
//!
//! Rules are checked in a fixed priority order and the first match wins:
//!
//! 1. HIGH severity in a HIGH risk area is always sent
//! 2. risk score >= 5 with fatigue other than HIGH is sent
//! 3. risk score >= 3 with HIGH fatigue is delayed
//! 4. everything else is suppressed

use crate::error::DecisionError;
use crate::fatigue::FatigueLevel;
use crate::level::{AreaRisk, RiskScore, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Minimum risk score for a send under manageable fatigue
pub const SEND_RISK_THRESHOLD: u8 = 5;
/// Minimum risk score for a delay under high fatigue
pub const DELAY_RISK_THRESHOLD: u8 = 3;

/// Action to take for an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Send,
    Delay,
    Suppress,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Send, Decision::Delay, Decision::Suppress];

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Send => "SEND",
            Decision::Delay => "DELAY",
            Decision::Suppress => "SUPPRESS",
        }
    }
}

impl FromStr for Decision {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEND" => Ok(Decision::Send),
            "DELAY" => Ok(Decision::Delay),
            "SUPPRESS" => Ok(Decision::Suppress),
            _ => Err(DecisionError::invalid(
                "decision",
                format!("'{}' is not one of SEND, DELAY, SUPPRESS", s),
            )),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// HIGH severity in a HIGH risk area, fatigue ignored
    CriticalOverride,
    /// Risk score at or above the send threshold with manageable fatigue
    HighRiskManageableFatigue,
    /// Risk score at or above the delay threshold with HIGH fatigue
    ElevatedRiskHighFatigue,
    /// No rule matched
    Fallthrough,
}

impl DecisionRule {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionRule::CriticalOverride => "critical_override",
            DecisionRule::HighRiskManageableFatigue => "high_risk_manageable_fatigue",
            DecisionRule::ElevatedRiskHighFatigue => "elevated_risk_high_fatigue",
            DecisionRule::Fallthrough => "fallthrough",
        }
    }

    /// Whether this rule bypasses fatigue entirely
    pub fn overrides_fatigue(self) -> bool {
        matches!(self, DecisionRule::CriticalOverride)
    }
}

/// Apply the decision rules, reporting which one fired
pub fn decide_with_rule(
    severity: Severity,
    area_risk: AreaRisk,
    risk_score: RiskScore,
    fatigue: FatigueLevel,
) -> (Decision, DecisionRule) {
    let score = risk_score.value();

    let outcome = if severity == Severity::High && area_risk == AreaRisk::High {
        (Decision::Send, DecisionRule::CriticalOverride)
    } else if score >= SEND_RISK_THRESHOLD && fatigue != FatigueLevel::High {
        (Decision::Send, DecisionRule::HighRiskManageableFatigue)
    } else if score >= DELAY_RISK_THRESHOLD && fatigue == FatigueLevel::High {
        (Decision::Delay, DecisionRule::ElevatedRiskHighFatigue)
    } else {
        (Decision::Suppress, DecisionRule::Fallthrough)
    };

    debug!(
        severity = severity.as_str(),
        area_risk = area_risk.as_str(),
        risk_score = score,
        fatigue = fatigue.as_str(),
        decision = outcome.0.as_str(),
        rule = outcome.1.as_str(),
        "Applied decision rules"
    );

    outcome
}

/// Apply the decision rules
pub fn decide(
    severity: Severity,
    area_risk: AreaRisk,
    risk_score: RiskScore,
    fatigue: FatigueLevel,
) -> Decision {
    decide_with_rule(severity, area_risk, risk_score, fatigue).0
}
