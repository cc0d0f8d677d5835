//! Alert Decision Engine
//!
//! Maps disaster severity, area risk, and time since the last alert to an
//! explainable SEND / DELAY / SUPPRESS decision:
//! - Risk scoring from ordinal level weights
//! - Alert fatigue bucketing from elapsed hours
//! - Ordered decision rules with a critical override
//! - Fixed explanation per decision

mod engine;
mod error;
mod explain;
mod fatigue;
mod level;
mod rules;

pub use engine::{evaluate, Evaluation};
pub use error::DecisionError;
pub use explain::{
    explain, explain_label, DELAY_EXPLANATION, SEND_EXPLANATION, SUPPRESS_EXPLANATION,
};
pub use fatigue::{classify_fatigue, FatigueLevel, RECENT_ALERT_HOURS, RESTED_AFTER_HOURS};
pub use level::{compute_risk_score, AreaRisk, RiskScore, Severity, MAX_RISK_SCORE, MIN_RISK_SCORE};
pub use rules::{
    decide, decide_with_rule, Decision, DecisionRule, DELAY_RISK_THRESHOLD, SEND_RISK_THRESHOLD,
};
