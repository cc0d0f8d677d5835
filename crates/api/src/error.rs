//! API Error Types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use decision_engine::DecisionError;
use input_validator::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decision(#[from] DecisionError),

    /// Request body was not a well-formed evaluation request
    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("Metrics exporter is disabled")]
    MetricsDisabled,
}

/// Error body sent to clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Decision(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::MetricsDisabled => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, field) = match self {
            ApiError::Validation(err) => (err.kind(), Some(err.field())),
            ApiError::Decision(err) => ("invalid_input", Some(err.field())),
            ApiError::Body(_) => ("invalid_body", None),
            ApiError::MetricsDisabled => ("metrics_disabled", None),
        };
        ErrorResponse {
            error,
            field,
            message: self.to_string(),
        }
    }

    /// Field label used on the validation failure counter
    pub fn failure_field(&self) -> &'static str {
        match self {
            ApiError::Validation(err) => err.field(),
            ApiError::Decision(err) => err.field(),
            ApiError::Body(_) => "body",
            ApiError::MetricsDisabled => "none",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
