use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Missing or malformed sections in generated text are never errors; the
/// parser degrades to empty fields. Unsupported characters are dropped during
/// rendering. Only the cases below reach the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The text-generation call failed or timed out. No document is produced.
    #[error("Upstream generation failed: {0}")]
    UpstreamGeneration(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UpstreamGeneration(e) => {
                tracing::error!("Upstream generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_GENERATION_FAILED",
                    "The text generation service failed; no documents were produced".to_string(),
                )
            }
            AppError::Render(e) if e.is_resource_failure() => {
                tracing::error!("Render resource failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_RESOURCE_FAILURE",
                    "Font resources required for rendering are unavailable".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    "The document could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
