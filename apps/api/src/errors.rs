use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const GENERATE_FAILED: &str = "Error generating mail.";
pub const REGENERATE_FAILED: &str = "Error regenerating mail.";
pub const SEND_FAILED: &str = "Error sending mail.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{ "success": false, "message": ... }` with HTTP
/// 500, rejected input included. Provider details are logged here and never
/// reach the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {detail}")]
    Llm {
        /// Short message shown to the user.
        public: &'static str,
        detail: String,
    },

    #[error("Mail error: {detail}")]
    Mail {
        public: &'static str,
        detail: String,
    },
}

impl AppError {
    pub fn llm(public: &'static str, detail: impl ToString) -> Self {
        AppError::Llm {
            public,
            detail: detail.to_string(),
        }
    }

    pub fn mail(public: &'static str, detail: impl ToString) -> Self {
        AppError::Mail {
            public,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Llm { public, detail } => {
                tracing::error!("LLM error: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
            AppError::Mail { public, detail } => {
                tracing::error!("Mail error: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message
        }));

        (status, body).into_response()
    }
}
