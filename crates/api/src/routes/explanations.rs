//! Explanation Routes

use axum::Json;
use decision_engine::{explain, Decision};
use serde::Serialize;

/// One decision and its canonical explanation
#[derive(Debug, Serialize)]
pub struct ExplanationEntry {
    pub decision: Decision,
    pub explanation: &'static str,
}

/// Response for explanations endpoint
#[derive(Debug, Serialize)]
pub struct ExplanationResponse {
    pub data: Vec<ExplanationEntry>,
    pub count: usize,
}

/// List every decision with its explanation
pub async fn get_explanations() -> Json<ExplanationResponse> {
    let data: Vec<ExplanationEntry> = Decision::ALL
        .iter()
        .map(|&decision| ExplanationEntry {
            decision,
            explanation: explain(decision),
        })
        .collect();

    Json(ExplanationResponse {
        count: data.len(),
        data,
    })
}
