//! Interactive form routes.
//!
//! Each form posts to its own endpoint and gets back an HTML fragment that
//! HTMX swaps into the page. Handlers call the tool functions directly rather
//! than going through the registry.

use askama::Template;
use axum::extract::State;
use axum::Form;
use serde::{Deserialize, Serialize};
use toolbox::{ToolDescriptor, ToolError};
use tracing::info;

use crate::state::AppState;

/// Main page with one form per tool.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub tools: Vec<ToolDescriptor>,
    pub weather_live: bool,
}

/// Result fragment for a single form submission.
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub tool: String,
    pub ok: bool,
    /// Pre-formatted JSON rather than plain text.
    pub preformatted: bool,
    pub body: String,
    pub error_kind: String,
}

impl ResultTemplate {
    fn text(tool: &str, body: impl Into<String>) -> Self {
        Self {
            tool: tool.to_string(),
            ok: true,
            preformatted: false,
            body: body.into(),
            error_kind: String::new(),
        }
    }

    fn json<T: Serialize>(tool: &str, value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(body) => Self {
                preformatted: true,
                ..Self::text(tool, body)
            },
            Err(err) => Self::error(tool, &ToolError::from(err)),
        }
    }

    fn error(tool: &str, err: &ToolError) -> Self {
        Self {
            tool: tool.to_string(),
            ok: false,
            preformatted: false,
            body: err.to_string(),
            error_kind: err.kind().to_string(),
        }
    }

    fn from_result<T>(
        tool: &str,
        result: Result<T, ToolError>,
        render: impl FnOnce(&str, T) -> Self,
    ) -> Self {
        match result {
            Ok(value) => render(tool, value),
            Err(err) => {
                info!(tool, error = %err, "Form submission failed");
                Self::error(tool, &err)
            }
        }
    }
}

#[derive(Deserialize)]
pub struct SentimentForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct WeatherForm {
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "celsius".to_string()
}

#[derive(Deserialize)]
pub struct CalculatorForm {
    #[serde(default)]
    pub operand1: String,
    #[serde(default)]
    pub operand2: String,
    #[serde(default)]
    pub operation: String,
}

/// Render the main page.
pub async fn index_page(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate {
        tools: state.invoker.registry().descriptors(),
        weather_live: state.weather.config().has_api_key(),
    }
}

/// Analyze the submitted text; renders JSON.
pub async fn sentiment_form(Form(form): Form<SentimentForm>) -> ResultTemplate {
    ResultTemplate::from_result("sentiment_analysis", toolbox::analyze(&form.text), |tool, r| {
        ResultTemplate::json(tool, &r)
    })
}

/// Look up the weather; renders plain text.
pub async fn weather_form(
    State(state): State<AppState>,
    Form(form): Form<WeatherForm>,
) -> ResultTemplate {
    let result = state.weather.get_weather(&form.location, &form.unit).await;
    ResultTemplate::from_result("get_current_weather", result, |tool, line| {
        ResultTemplate::text(tool, line)
    })
}

/// Run the calculator; renders a number.
pub async fn calculator_form(Form(form): Form<CalculatorForm>) -> ResultTemplate {
    let result = parse_operand("operand1", &form.operand1).and_then(|a| {
        let b = parse_operand("operand2", &form.operand2)?;
        toolbox::calculate(a, b, &form.operation)
    });
    ResultTemplate::from_result("simple_calculator", result, |tool, value| {
        ResultTemplate::text(tool, value.to_string())
    })
}

fn parse_operand(name: &str, raw: &str) -> Result<f64, ToolError> {
    raw.trim().parse().map_err(|_| ToolError::InvalidParameter {
        name: name.to_string(),
        reason: "expected number".to_string(),
    })
}
