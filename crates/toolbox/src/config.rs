//! Weather provider configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default OpenWeatherMap current-weather endpoint.
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default live-path timeout.
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration handed to [`crate::Weather`] at construction.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Provider credential. `None` means every lookup uses mock data.
    pub api_key: Option<String>,
    /// Provider endpoint.
    pub endpoint: Url,
    /// Bound on the single live request.
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Configuration without a credential, pointing at the default endpoint.
    pub fn new() -> Self {
        Self {
            api_key: None,
            endpoint: Url::parse(DEFAULT_WEATHER_URL).expect("default weather URL is valid"),
            timeout: DEFAULT_WEATHER_TIMEOUT,
        }
    }

    /// Set the provider credential. Blank keys are treated as absent.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `WEATHER_API_KEY` | Provider credential | (none, mock data) |
    /// | `WEATHER_API_URL` | Provider endpoint | OpenWeatherMap current weather |
    /// | `WEATHER_TIMEOUT_SECS` | Live request timeout | `10` |
    pub fn from_env() -> Result<Self, WeatherConfigError> {
        let mut config = Self::new();

        if let Ok(key) = env::var("WEATHER_API_KEY") {
            config = config.with_api_key(key);
        }

        if let Ok(raw) = env::var("WEATHER_API_URL") {
            let endpoint =
                Url::parse(&raw).map_err(|_| WeatherConfigError::InvalidEndpoint(raw.clone()))?;
            config = config.with_endpoint(endpoint);
        }

        if let Ok(raw) = env::var("WEATHER_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .map_err(|_| WeatherConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Weather configuration errors.
#[derive(Debug, Error)]
pub enum WeatherConfigError {
    #[error("Invalid WEATHER_API_URL: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid WEATHER_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}
