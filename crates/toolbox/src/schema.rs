//! Declared parameter schemas for tools.
//!
//! Every tool publishes a [`ToolSchema`] listing its parameters. The registry
//! validates incoming arguments against it before dispatch, so tools can rely
//! on required parameters being present and correctly typed.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ToolError;

/// JSON type of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl ParamKind {
    fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub required: bool,
    /// Value used when the caller omits the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed values, published as a hint only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl ParamSpec {
    /// A required parameter.
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: true,
            default: None,
            choices: Vec::new(),
        }
    }

    /// An optional parameter with a default value.
    pub fn optional(name: &str, kind: ParamKind, description: &str, default: Value) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: false,
            default: Some(default),
            choices: Vec::new(),
        }
    }

    /// Attach the allowed values hint.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

/// Parameter schema for a tool.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolSchema {
    pub params: Vec<ParamSpec>,
}

impl ToolSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Look up a declared parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Check arguments against the schema and fill in defaults.
    ///
    /// Rejects unknown parameters, missing required parameters and values
    /// of the wrong JSON type.
    pub fn validate(
        &self,
        mut args: HashMap<String, Value>,
    ) -> Result<HashMap<String, Value>, ToolError> {
        if let Some(unknown) = args.keys().find(|key| self.get(key).is_none()) {
            return Err(ToolError::UnknownParameter(unknown.clone()));
        }

        for spec in &self.params {
            match args.get(&spec.name) {
                Some(value) if spec.kind.matches(value) => {}
                Some(_) => {
                    return Err(ToolError::InvalidParameter {
                        name: spec.name.clone(),
                        reason: format!("expected {}", spec.kind.as_str()),
                    });
                }
                None => match (&spec.default, spec.required) {
                    (Some(default), _) => {
                        args.insert(spec.name.clone(), default.clone());
                    }
                    (None, true) => return Err(ToolError::MissingParameter(spec.name.clone())),
                    (None, false) => {}
                },
            }
        }

        Ok(args)
    }

    /// Render as a JSON Schema object, as published to remote callers.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for spec in &self.params {
            let mut prop = Map::new();
            prop.insert("type".into(), Value::String(spec.kind.as_str().into()));
            prop.insert("description".into(), Value::String(spec.description.clone()));
            if let Some(ref default) = spec.default {
                prop.insert("default".into(), default.clone());
            }
            if !spec.choices.is_empty() {
                prop.insert("enum".into(), serde_json::json!(spec.choices));
            }
            properties.insert(spec.name.clone(), Value::Object(prop));
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_like() -> ToolSchema {
        ToolSchema::new()
            .param(ParamSpec::required("location", ParamKind::String, "City"))
            .param(ParamSpec::optional(
                "unit",
                ParamKind::String,
                "Temperature unit",
                json!("celsius"),
            ))
    }

    fn args(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_are_filled() {
        let validated = weather_like()
            .validate(args(json!({"location": "Paris"})))
            .unwrap();
        assert_eq!(validated["unit"], json!("celsius"));
        assert_eq!(validated["location"], json!("Paris"));
    }

    #[test]
    fn test_missing_required() {
        let result = weather_like().validate(HashMap::new());
        assert!(matches!(result, Err(ToolError::MissingParameter(ref p)) if p == "location"));
    }

    #[test]
    fn test_unknown_parameter() {
        let result = weather_like().validate(args(json!({"location": "Paris", "days": 3})));
        assert!(matches!(result, Err(ToolError::UnknownParameter(ref p)) if p == "days"));
    }

    #[test]
    fn test_wrong_type() {
        let result = weather_like().validate(args(json!({"location": 42})));
        assert!(matches!(result, Err(ToolError::InvalidParameter { ref name, .. }) if name == "location"));
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = weather_like().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["location"]["type"], "string");
        assert_eq!(schema["properties"]["unit"]["default"], "celsius");
        assert_eq!(schema["required"], json!(["location"]));
    }

    #[test]
    fn test_choices_rendered_as_enum() {
        let schema = ToolSchema::new()
            .param(
                ParamSpec::required("operation", ParamKind::String, "Operation")
                    .with_choices(["add", "subtract"]),
            )
            .to_json_schema();
        assert_eq!(schema["properties"]["operation"]["enum"], json!(["add", "subtract"]));
    }
}
