//! Canonical explanations for each decision

use crate::error::DecisionError;
use crate::rules::Decision;

pub const SEND_EXPLANATION: &str =
    "Alert sent because the disaster risk is high and alert fatigue is manageable.";
pub const DELAY_EXPLANATION: &str = "Alert delayed due to existing risk but high alert fatigue.";
pub const SUPPRESS_EXPLANATION: &str = "Alert suppressed to avoid unnecessary alert fatigue.";

/// Human-readable explanation for a decision
pub fn explain(decision: Decision) -> &'static str {
    match decision {
        Decision::Send => SEND_EXPLANATION,
        Decision::Delay => DELAY_EXPLANATION,
        Decision::Suppress => SUPPRESS_EXPLANATION,
    }
}

/// Explanation for a decision given by its label, e.g. from a stored or
/// transmitted result
pub fn explain_label(label: &str) -> Result<&'static str, DecisionError> {
    let decision: Decision = label.parse()?;
    Ok(explain(decision))
}
