//! Weather tool with a live provider lookup and a mock fallback.

use std::fmt;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::WeatherConfig;
use crate::error::ToolError;
use crate::schema::{ParamKind, ParamSpec, ToolSchema};
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Temperature reported by the mock path, in Celsius.
pub const MOCK_BASE_CELSIUS: f64 = 22.0;

/// Conditions the mock path picks from.
pub const MOCK_CONDITIONS: [&str; 5] = ["Sunny", "Partly Cloudy", "Cloudy", "Light Rain", "Clear"];

const MOCK_SUFFIX: &str = " (Mock Data)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Case-insensitive; anything other than "fahrenheit" is Celsius.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("fahrenheit") {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Provider `units` query value.
    fn units_param(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "metric",
            TemperatureUnit::Fahrenheit => "imperial",
        }
    }

    /// Convert a Celsius reading to this unit, rounded to an integer.
    pub fn from_celsius(&self, celsius: f64) -> i64 {
        let value = match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        };
        value.round() as i64
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => f.write_str("celsius"),
            TemperatureUnit::Fahrenheit => f.write_str("fahrenheit"),
        }
    }
}

/// A single weather reading, live or mocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: i64,
    pub unit_symbol: TemperatureUnit,
    /// Provider wording on the live path, one of [`MOCK_CONDITIONS`] otherwise.
    pub condition: String,
    pub is_mock: bool,
}

impl WeatherReport {
    /// The one-line description returned to callers.
    pub fn describe(&self) -> String {
        let line = format!(
            "Weather in {}: {}°{}, {}",
            self.location,
            self.temperature,
            self.unit_symbol.symbol(),
            self.condition
        );
        if self.is_mock {
            line + MOCK_SUFFIX
        } else {
            line
        }
    }
}

/// Why the live path was abandoned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackReason {
    #[error("no weather API key configured")]
    MissingCredential,

    #[error("weather provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("weather provider returned status {0}")]
    UpstreamStatus(u16),

    #[error("malformed weather provider response: {0}")]
    MalformedResponse(String),
}

/// Result of a lookup: either live data or mock data plus the reason.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Live(WeatherReport),
    Fallback {
        report: WeatherReport,
        reason: FallbackReason,
    },
}

impl WeatherOutcome {
    pub fn report(&self) -> &WeatherReport {
        match self {
            WeatherOutcome::Live(report) => report,
            WeatherOutcome::Fallback { report, .. } => report,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            WeatherOutcome::Live(_) => None,
            WeatherOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.report().is_mock
    }

    pub fn describe(&self) -> String {
        self.report().describe()
    }
}

#[derive(Deserialize)]
struct UpstreamBody {
    main: UpstreamMain,
    weather: Vec<UpstreamCondition>,
}

#[derive(Deserialize)]
struct UpstreamMain {
    temp: f64,
}

#[derive(Deserialize)]
struct UpstreamCondition {
    description: String,
}

/// Build the mock report for a location.
pub fn mock_report(location: &str, unit: TemperatureUnit) -> WeatherReport {
    let index = rand::thread_rng().gen_range(0..MOCK_CONDITIONS.len());
    WeatherReport {
        location: location.to_string(),
        temperature: unit.from_celsius(MOCK_BASE_CELSIUS),
        unit_symbol: unit,
        condition: MOCK_CONDITIONS[index].to_string(),
        is_mock: true,
    }
}

/// Weather tool backed by an OpenWeatherMap-compatible provider.
///
/// A single live request is attempted per lookup. Any failure (no API key,
/// network error, non-2xx status, unexpected body) yields mock data instead;
/// the reason is kept on [`WeatherOutcome::Fallback`] and logged.
///
/// # Parameters
///
/// - `location` (required): e.g. "Paris, FR". Must not be empty.
/// - `unit` (optional): "celsius" (default) or "fahrenheit".
///
/// # Examples
///
/// ```json
/// {"location": "Paris, FR"}
/// {"location": "Austin, US", "unit": "fahrenheit"}
/// ```
pub struct Weather {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl Weather {
    /// Create a new weather tool.
    pub fn new(config: WeatherConfig) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("toolbox/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Look up the weather, keeping the live/fallback distinction.
    pub async fn lookup(&self, location: &str, unit: &str) -> Result<WeatherOutcome, ToolError> {
        if location.is_empty() {
            return Err(ToolError::MissingLocation);
        }

        let unit = TemperatureUnit::parse_lenient(unit);
        info!("Fetching weather for {} in {}", location, unit);

        match self.fetch_live(location, unit).await {
            Ok(report) => Ok(WeatherOutcome::Live(report)),
            Err(reason) => {
                match reason {
                    FallbackReason::MissingCredential => {
                        info!(location, "No weather API key, using mock data")
                    }
                    ref other => warn!(location, reason = %other, "Weather lookup failed, using mock data"),
                }
                Ok(WeatherOutcome::Fallback {
                    report: mock_report(location, unit),
                    reason,
                })
            }
        }
    }

    /// Describe the current weather in one line.
    ///
    /// Mock results end with " (Mock Data)". The only error is
    /// [`ToolError::MissingLocation`].
    pub async fn get_weather(&self, location: &str, unit: &str) -> Result<String, ToolError> {
        Ok(self.lookup(location, unit).await?.describe())
    }

    async fn fetch_live(
        &self,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<WeatherReport, FallbackReason> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FallbackReason::MissingCredential)?;

        debug!("Fetching weather from: {}", self.config.endpoint);

        let response = self
            .client
            .get(self.config.endpoint.clone())
            .query(&[
                ("q", location),
                ("units", unit.units_param()),
                ("appid", api_key),
            ])
            .send()
            .await
            .map_err(|e| FallbackReason::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FallbackReason::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FallbackReason::UpstreamUnavailable(e.to_string()))?;

        let parsed: UpstreamBody = serde_json::from_str(&body)
            .map_err(|e| FallbackReason::MalformedResponse(e.to_string()))?;

        if !parsed.main.temp.is_finite() {
            return Err(FallbackReason::MalformedResponse(
                "temperature is not a finite number".to_string(),
            ));
        }

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| {
                FallbackReason::MalformedResponse("missing weather condition".to_string())
            })?;

        Ok(WeatherReport {
            location: location.to_string(),
            temperature: parsed.main.temp.round() as i64,
            unit_symbol: unit,
            condition,
            is_mock: false,
        })
    }
}

#[async_trait]
impl Tool for Weather {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn description(&self) -> &str {
        "Fetches the current weather for a specified location. \
         Falls back to mock data when the weather provider is unavailable."
    }

    fn parameters(&self) -> ToolSchema {
        ToolSchema::new()
            .param(ParamSpec::required(
                "location",
                ParamKind::String,
                "The location to get weather for, e.g. 'Paris, FR'",
            ))
            .param(
                ParamSpec::optional(
                    "unit",
                    ParamKind::String,
                    "Temperature unit, either 'celsius' or 'fahrenheit'",
                    serde_json::json!("celsius"),
                )
                .with_choices(["celsius", "fahrenheit"]),
            )
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let location = args.get_string("location")?;
        let unit = args
            .get_string_opt("unit")
            .unwrap_or_else(|| "celsius".to_string());

        let line = self.get_weather(&location, &unit).await?;
        Ok(ToolOutput::text(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use url::Url;

    const PATH: &str = "/data/2.5/weather";

    async fn spawn_upstream(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}{}", addr, PATH)).unwrap()
    }

    async fn ok_handler(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        if q.get("appid").map(String::as_str) != Some("test-key") {
            return (StatusCode::UNAUTHORIZED, Json(json!({"cod": 401})));
        }
        let temp = match q.get("units").map(String::as_str) {
            Some("imperial") => 61.7,
            _ => 16.4,
        };
        (
            StatusCode::OK,
            Json(json!({
                "name": q.get("q").cloned().unwrap_or_default(),
                "main": {"temp": temp, "humidity": 80},
                "weather": [{"main": "Rain", "description": "light rain"}]
            })),
        )
    }

    fn weather_with(endpoint: Url, key: Option<&str>) -> Weather {
        let mut config = WeatherConfig::new()
            .with_endpoint(endpoint)
            .with_timeout(Duration::from_millis(500));
        if let Some(key) = key {
            config = config.with_api_key(key);
        }
        Weather::new(config).unwrap()
    }

    fn no_key() -> Weather {
        Weather::new(WeatherConfig::new()).unwrap()
    }

    fn make_args(location: &str, unit: Option<&str>) -> ToolArgs {
        let mut params = HashMap::new();
        params.insert("location".to_string(), Value::String(location.to_string()));
        if let Some(unit) = unit {
            params.insert("unit".to_string(), Value::String(unit.to_string()));
        }
        ToolArgs::new(params)
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!(TemperatureUnit::parse_lenient("fahrenheit"), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::parse_lenient("FahrenHeit"), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::parse_lenient("celsius"), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::parse_lenient("kelvin"), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::parse_lenient(""), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::parse_lenient(" fahrenheit "), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_mock_conversion_is_stable() {
        for _ in 0..50 {
            let report = mock_report("Paris, FR", TemperatureUnit::Fahrenheit);
            assert_eq!(report.temperature, 72);
            assert!(MOCK_CONDITIONS.contains(&report.condition.as_str()));
        }
        assert_eq!(mock_report("Paris, FR", TemperatureUnit::Celsius).temperature, 22);
    }

    #[test]
    fn test_describe() {
        let report = WeatherReport {
            location: "Oslo".into(),
            temperature: -3,
            unit_symbol: TemperatureUnit::Celsius,
            condition: "snow".into(),
            is_mock: false,
        };
        assert_eq!(report.describe(), "Weather in Oslo: -3°C, snow");

        let mocked = WeatherReport { is_mock: true, ..report };
        assert_eq!(mocked.describe(), "Weather in Oslo: -3°C, snow (Mock Data)");
    }

    #[tokio::test]
    async fn test_missing_location() {
        let weather = no_key();
        assert!(matches!(
            weather.get_weather("", "celsius").await,
            Err(ToolError::MissingLocation)
        ));

        let line = weather.get_weather("   ", "celsius").await.unwrap();
        assert!(line.starts_with("Weather in    : 22°C, "));
        assert!(line.ends_with("(Mock Data)"));
    }

    #[tokio::test]
    async fn test_no_credential_uses_mock() {
        let weather = no_key();
        let outcome = weather.lookup("Paris, FR", "fahrenheit").await.unwrap();
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::MissingCredential));

        let line = weather.get_weather("Paris, FR", "fahrenheit").await.unwrap();
        assert!(line.starts_with("Weather in Paris, FR: 72°F, "));
        assert!(line.ends_with("(Mock Data)"));
    }

    #[tokio::test]
    async fn test_live_lookup() {
        let endpoint = spawn_upstream(Router::new().route(PATH, get(ok_handler))).await;
        let weather = weather_with(endpoint, Some("test-key"));

        let line = weather.get_weather("London", "celsius").await.unwrap();
        assert_eq!(line, "Weather in London: 16°C, light rain");

        let outcome = weather.lookup("London", "FAHRENHEIT").await.unwrap();
        assert!(!outcome.is_mock());
        assert_eq!(outcome.report().temperature, 62);
        assert_eq!(outcome.report().unit_symbol, TemperatureUnit::Fahrenheit);
    }

    #[tokio::test]
    async fn test_upstream_error_status_falls_back() {
        let router = Router::new().route(
            PATH,
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let weather = weather_with(spawn_upstream(router).await, Some("test-key"));

        let outcome = weather.lookup("Paris, FR", "fahrenheit").await.unwrap();
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::UpstreamStatus(500)));
        assert!(outcome.describe().contains("72°F"));
        assert!(outcome.describe().contains("(Mock Data)"));
    }

    #[tokio::test]
    async fn test_wrong_key_falls_back() {
        let endpoint = spawn_upstream(Router::new().route(PATH, get(ok_handler))).await;
        let weather = weather_with(endpoint, Some("wrong-key"));

        let outcome = weather.lookup("London", "celsius").await.unwrap();
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::UpstreamStatus(401)));
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let router = Router::new()
            .route(PATH, get(|| async { Json(json!({"unexpected": true})) }))
            .route(
                "/empty-conditions",
                get(|| async { Json(json!({"main": {"temp": 10.0}, "weather": []})) }),
            );
        let endpoint = spawn_upstream(router).await;

        let weather = weather_with(endpoint.clone(), Some("test-key"));
        let outcome = weather.lookup("Rome", "celsius").await.unwrap();
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::MalformedResponse(_))
        ));
        assert_eq!(outcome.report().temperature, 22);

        let weather = weather_with(endpoint.join("/empty-conditions").unwrap(), Some("test-key"));
        let outcome = weather.lookup("Rome", "celsius").await.unwrap();
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let router = Router::new().route(
            PATH,
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"main": {"temp": 10.0}, "weather": [{"description": "late"}]}))
            }),
        );
        let weather = weather_with(spawn_upstream(router).await, Some("test-key"));

        let outcome = weather.lookup("Lima", "celsius").await.unwrap();
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::UpstreamUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_falls_back() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Url::parse(&format!("http://{}{}", addr, PATH)).unwrap();
        let weather = weather_with(endpoint, Some("test-key"));

        let line = weather.get_weather("Cairo", "celsius").await.unwrap();
        assert!(line.contains("22°C"));
        assert!(line.ends_with("(Mock Data)"));
    }

    #[tokio::test]
    async fn test_tool_execute_defaults_to_celsius() {
        let weather = no_key();
        let output = weather.execute(make_args("Berlin", None)).await.unwrap();
        assert!(output.display_text().contains("22°C"));

        let output = weather
            .execute(make_args("Berlin", Some("fahrenheit")))
            .await
            .unwrap();
        assert!(output.display_text().contains("72°F"));
    }

    // Requires WEATHER_API_KEY and network access.
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_live_provider() {
        let _ = dotenvy::dotenv();
        let weather = Weather::new(WeatherConfig::from_env().unwrap()).unwrap();
        let outcome = weather.lookup("London,UK", "celsius").await.unwrap();
        assert!(!outcome.is_mock(), "fell back: {:?}", outcome.fallback_reason());
    }
}
