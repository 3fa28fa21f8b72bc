//! Error types for tool operations.

use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Parameter not declared by the tool's schema.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Calculator operation name not recognized.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division with a zero divisor.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Weather lookup without a location.
    #[error("Location is required")]
    MissingLocation,

    /// Sentiment scorer failed.
    #[error("Sentiment scorer error: {0}")]
    Scorer(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invocation exceeded the configured timeout.
    #[error("Tool execution timed out")]
    TimedOut,

    /// General execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Stable snake_case kind used in structured error envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::NotFound(_) => "tool_not_found",
            ToolError::MissingParameter(_)
            | ToolError::UnknownParameter(_)
            | ToolError::InvalidParameter { .. }
            | ToolError::JsonError(_) => "argument_schema_mismatch",
            ToolError::InvalidOperation(_) => "invalid_operation",
            ToolError::DivisionByZero => "division_by_zero",
            ToolError::MissingLocation => "missing_location",
            ToolError::Scorer(_) => "scorer_error",
            ToolError::HttpError(_) => "http_error",
            ToolError::TimedOut => "timeout",
            ToolError::ExecutionFailed(_) => "internal",
        }
    }

    /// Whether the caller sent arguments that don't fit the tool's schema.
    pub fn is_schema_mismatch(&self) -> bool {
        self.kind() == "argument_schema_mismatch"
    }
}
