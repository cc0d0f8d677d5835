//! Evaluation Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use decision_engine::{AreaRisk, Decision, DecisionRule, Evaluation, FatigueLevel, Severity};
use input_validator::RawEvaluationInput;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cue::SoundCue;
use crate::error::ApiError;
use crate::AppState;

/// Body of an evaluation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateRequest {
    #[serde(flatten)]
    pub input: RawEvaluationInput,
    /// Caller's sound toggle; falls back to the configured default
    #[serde(default)]
    pub sound_enabled: Option<bool>,
}

/// Intermediate values behind a decision
#[derive(Debug, Clone, Serialize)]
pub struct DecisionTrace {
    pub severity: Severity,
    pub area_risk: AreaRisk,
    pub risk_score: u8,
    pub fatigue: FatigueLevel,
    pub rule: DecisionRule,
    pub overrides_fatigue: bool,
}

/// Response for evaluate endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateResponse {
    pub decision: Decision,
    pub explanation: String,
    pub sound_cue: Option<SoundCue>,
    pub trace: DecisionTrace,
}

impl EvaluateResponse {
    pub fn new(evaluation: Evaluation, sound_enabled: bool) -> Self {
        Self {
            decision: evaluation.decision,
            sound_cue: SoundCue::for_decision(evaluation.decision, sound_enabled),
            trace: DecisionTrace {
                severity: evaluation.severity,
                area_risk: evaluation.area_risk,
                risk_score: evaluation.risk_score.value(),
                fatigue: evaluation.fatigue,
                rule: evaluation.rule,
                overrides_fatigue: evaluation.rule.overrides_fatigue(),
            },
            explanation: evaluation.explanation,
        }
    }
}

/// Evaluate an alert
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| reject(rejection.into()))?;
    let input = state
        .validator
        .validate(&request.input)
        .map_err(|err| reject(err.into()))?;

    let evaluation = input.evaluate().map_err(|err| reject(err.into()))?;
    counter!(
        "alert_decisions_total",
        "decision" => evaluation.decision.as_str(),
        "rule" => evaluation.rule.as_str()
    )
    .increment(1);

    info!(
        severity = evaluation.severity.as_str(),
        area_risk = evaluation.area_risk.as_str(),
        hours = input.hours_since_last_alert,
        decision = evaluation.decision.as_str(),
        rule = evaluation.rule.as_str(),
        "Alert evaluated"
    );

    let sound_enabled = request
        .sound_enabled
        .unwrap_or(state.config.sound.enabled_by_default);

    Ok(Json(EvaluateResponse::new(evaluation, sound_enabled)))
}

/// Log and count a rejected request
fn reject(err: ApiError) -> ApiError {
    warn!(field = err.failure_field(), "Rejected evaluation input: {}", err);
    counter!("alert_validation_failures_total", "field" => err.failure_field()).increment(1);
    err
}
