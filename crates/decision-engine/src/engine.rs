//! Evaluation pipeline: risk scoring, fatigue, rules, explanation

use crate::error::DecisionError;
use crate::explain::explain;
use crate::fatigue::{classify_fatigue, FatigueLevel};
use crate::level::{compute_risk_score, AreaRisk, RiskScore, Severity};
use crate::rules::{decide_with_rule, Decision, DecisionRule};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a single evaluation, with the intermediate values that led to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub decision: Decision,
    pub explanation: String,
    pub severity: Severity,
    pub area_risk: AreaRisk,
    pub risk_score: RiskScore,
    pub fatigue: FatigueLevel,
    pub rule: DecisionRule,
}

/// Run the full decision pipeline
///
/// Pure and stateless: identical inputs always produce identical output, and
/// concurrent callers need no coordination.
pub fn evaluate(
    severity: Severity,
    area_risk: AreaRisk,
    hours_since_last_alert: f64,
) -> Result<Evaluation, DecisionError> {
    let risk_score = compute_risk_score(severity, area_risk);
    let fatigue = classify_fatigue(hours_since_last_alert)?;
    let (decision, rule) = decide_with_rule(severity, area_risk, risk_score, fatigue);

    debug!(
        hours = hours_since_last_alert,
        decision = decision.as_str(),
        "Evaluated alert"
    );

    Ok(Evaluation {
        decision,
        explanation: explain(decision).to_string(),
        severity,
        area_risk,
        risk_score,
        fatigue,
        rule,
    })
}
