//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use toolbox::{WeatherConfig, WeatherConfigError};

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Per-invocation timeout on the tool-call API.
    pub tool_timeout: Option<Duration>,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Weather provider settings.
    pub weather: WeatherConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TOOLBOX_ADDR` | Server bind address | `127.0.0.1:7860` |
    /// | `TOOLBOX_TOOL_TIMEOUT_SECS` | Tool-call timeout | (none) |
    /// | `TOOLBOX_STATIC_DIR` | Static assets | `static` in this crate |
    ///
    /// Weather settings come from [`WeatherConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("TOOLBOX_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:7860".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let tool_timeout = match env::var("TOOLBOX_TOOL_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse().map_err(|_| ConfigError::InvalidTimeout(raw))?,
            )),
            Err(_) => None,
        };

        let static_dir = env::var("TOOLBOX_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")));

        let weather = WeatherConfig::from_env()?;

        Ok(Self {
            addr,
            tool_timeout,
            static_dir,
            weather,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOOLBOX_ADDR format")]
    InvalidAddr,

    #[error("Invalid TOOLBOX_TOOL_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),

    #[error(transparent)]
    Weather(#[from] WeatherConfigError),
}
