use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pipeline::PipelineError;

/// Caller-visible error: a status code and a fixed, generic detail string.
/// Raw diagnostic detail (model output, parse errors) stays in the logs.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn unprocessable(detail: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.to_string(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::SafetyRejection(message) => Self {
                status: StatusCode::BAD_REQUEST,
                detail: message.to_string(),
            },
            PipelineError::MalformedOutput(_) => Self {
                status: StatusCode::BAD_GATEWAY,
                detail: "Refiner returned invalid JSON".to_string(),
            },
            PipelineError::Upstream(e) => {
                tracing::error!(error = %e, "upstream model call failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: "Internal error while processing the request".to_string(),
                }
            }
            PipelineError::Validation(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: "Internal error while processing the request".to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
