//! Tool trait definition and types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::schema::ToolSchema;

/// Arguments passed to a tool for execution.
///
/// By the time a tool sees these, the registry has already validated them
/// against the tool's schema and filled in defaults.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Parameters as key-value pairs.
    pub params: HashMap<String, Value>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self { params }
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Get an optional string parameter.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        self.params.get(key)?.as_str().map(|s| s.to_string())
    }

    /// Get an f64 parameter, returning an error if missing or not a number.
    pub fn get_f64(&self, key: &str) -> Result<f64, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_f64()
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected number".to_string(),
            })
    }
}

/// Output from a tool execution.
///
/// The content is JSON so tools can return scalars (a number, a line of text)
/// or structured objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Value,
}

impl ToolOutput {
    /// Output a line of text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Value::String(content.into()),
        }
    }

    /// Output a number. JSON has no infinity or NaN, so non-finite values
    /// are carried as their text form ("inf", "-inf", "NaN").
    pub fn number(value: f64) -> Self {
        Self {
            content: serde_json::Number::from_f64(value)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(value.to_string())),
        }
    }

    /// Output any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        Ok(Self {
            content: serde_json::to_value(value)?,
        })
    }

    /// The content as display text: strings unquoted, everything else as JSON.
    pub fn display_text(&self) -> String {
        match &self.content {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Trait for tools that can be invoked through the registry.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Declared parameters.
    fn parameters(&self) -> ToolSchema;

    /// Execute the tool with validated arguments.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_args_accessors() {
        let params: HashMap<String, Value> =
            serde_json::from_value(json!({"a": 1.5, "op": "add"})).unwrap();
        let args = ToolArgs::new(params);

        assert_eq!(args.get_f64("a").unwrap(), 1.5);
        assert_eq!(args.get_string("op").unwrap(), "add");
        assert!(args.get_string_opt("missing").is_none());
        assert!(matches!(args.get_f64("op"), Err(ToolError::InvalidParameter { .. })));
        assert!(matches!(args.get_string("b"), Err(ToolError::MissingParameter(_))));
    }

    #[test]
    fn test_output_display() {
        assert_eq!(ToolOutput::text("hi").display_text(), "hi");
        assert_eq!(ToolOutput::number(7.0).display_text(), "7.0");
        assert_eq!(ToolOutput::number(f64::NAN).content, json!("NaN"));
        assert_eq!(ToolOutput::number(f64::INFINITY).content, json!("inf"));
        assert_eq!(ToolOutput::number(f64::NEG_INFINITY).display_text(), "-inf");
    }
}
