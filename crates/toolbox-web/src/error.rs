//! Error types for the web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use toolbox::ToolError;

/// Errors surfaced by JSON endpoints outside the tool-call envelope.
#[derive(Debug, Error)]
pub enum WebError {
    /// A tool failed while serving a diagnostics request.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::Tool(err) if err.is_schema_mismatch() => StatusCode::UNPROCESSABLE_ENTITY,
            WebError::Tool(ToolError::MissingLocation) => StatusCode::BAD_REQUEST,
            WebError::Tool(err) => {
                tracing::error!("Tool error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for web handlers.
pub type Result<T> = std::result::Result<T, WebError>;
