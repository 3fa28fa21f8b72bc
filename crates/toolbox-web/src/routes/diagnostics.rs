//! Diagnostics for the weather integration.
//!
//! Reports whether a provider key is configured (never the key itself) and
//! can run a single lookup showing which path served it.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use toolbox::{WeatherOutcome, WeatherReport};

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct EnvironmentReport {
    pub weather_api_key: &'static str,
    pub api_key_length: usize,
    pub weather_endpoint: String,
    pub weather_timeout_secs: u64,
    pub tool_timeout_secs: Option<u64>,
    pub tools: Vec<String>,
    pub version: &'static str,
}

#[derive(Deserialize)]
pub struct ProbeQuery {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_location() -> String {
    "London,UK".to_string()
}

fn default_unit() -> String {
    "celsius".to_string()
}

#[derive(Serialize)]
pub struct ProbeReport {
    /// "live" or "mock".
    pub source: &'static str,
    pub description: String,
    pub report: WeatherReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl From<WeatherOutcome> for ProbeReport {
    fn from(outcome: WeatherOutcome) -> Self {
        let description = outcome.describe();
        match outcome {
            WeatherOutcome::Live(report) => Self {
                source: "live",
                description,
                report,
                fallback_reason: None,
            },
            WeatherOutcome::Fallback { report, reason } => Self {
                source: "mock",
                description,
                report,
                fallback_reason: Some(reason.to_string()),
            },
        }
    }
}

/// Configuration overview.
pub async fn environment_api(State(state): State<AppState>) -> Json<EnvironmentReport> {
    let weather = state.weather.config();
    let key_length = weather.api_key.as_deref().map(str::len).unwrap_or(0);

    Json(EnvironmentReport {
        weather_api_key: if weather.has_api_key() { "found" } else { "not found" },
        api_key_length: key_length,
        weather_endpoint: weather.endpoint.to_string(),
        weather_timeout_secs: weather.timeout.as_secs(),
        tool_timeout_secs: state.invoker.policy().timeout.map(|t| t.as_secs()),
        tools: state
            .invoker
            .registry()
            .list_tools()
            .into_iter()
            .map(String::from)
            .collect(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run one weather lookup and report which path answered.
pub async fn weather_probe_api(
    State(state): State<AppState>,
    Query(query): Query<ProbeQuery>,
) -> Result<Json<ProbeReport>> {
    let outcome = state.weather.lookup(&query.location, &query.unit).await?;
    Ok(Json(outcome.into()))
}
