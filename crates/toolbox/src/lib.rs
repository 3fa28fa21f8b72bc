//! Tool registry with sentiment, weather and calculator tools.
//!
//! This crate provides a `ToolRegistry` mapping stable tool names to tool
//! implementations with declared parameter schemas, plus a `ToolInvoker` that
//! serves as the remote invocation boundary: it takes a tool name and JSON
//! arguments and always answers with a structured envelope.
//!
//! # Built-in Tools
//!
//! - [`Sentiment`] (`sentiment_analysis`) - Polarity, subjectivity and a
//!   positive/neutral/negative assessment.
//! - [`Weather`] (`get_current_weather`) - Current weather from an
//!   OpenWeatherMap-compatible provider, with mock data when the provider
//!   can't be used.
//! - [`Calculator`] (`simple_calculator`) - add, subtract, multiply, divide.
//!
//! The tool functions are also exported directly ([`analyze`],
//! [`calculate`], [`Weather::get_weather`]) for callers that don't need the
//! registry, such as form handlers.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbox::{default_registry, ToolInvoker, WeatherConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = default_registry(WeatherConfig::new()).unwrap();
//!     let invoker = ToolInvoker::new(registry);
//!
//!     let response = invoker
//!         .invoke_json("simple_calculator", r#"{"operand1": 2, "operand2": 3, "operation": "add"}"#)
//!         .await;
//!     println!("{}", serde_json::to_string(&response).unwrap());
//!     // {"tool":"simple_calculator","ok":true,"result":5.0}
//! }
//! ```

mod config;
mod error;
mod invoker;
mod registry;
mod schema;
mod tool;
pub mod tools;

pub use config::{WeatherConfig, WeatherConfigError, DEFAULT_WEATHER_TIMEOUT, DEFAULT_WEATHER_URL};
pub use error::ToolError;
pub use invoker::{InvocationResponse, ToolFailure, ToolInvocationRequest, ToolInvoker, ToolPolicy};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use schema::{ParamKind, ParamSpec, ToolSchema};
pub use tool::{Tool, ToolArgs, ToolOutput};
pub use tools::{
    analyze, calculate, Assessment, Calculator, FallbackReason, LexiconScorer, Operation,
    Sentiment, SentimentResult, SentimentScorer, TemperatureUnit, Weather, WeatherOutcome,
    WeatherReport,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

use std::sync::Arc;

/// Create a new registry with all built-in tools registered.
pub fn default_registry(weather: WeatherConfig) -> Result<ToolRegistry, ToolError> {
    Ok(registry_with_weather(Arc::new(Weather::new(weather)?)))
}

/// Create a registry with the built-in tools, sharing an existing weather tool.
pub fn registry_with_weather(weather: Arc<Weather>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Sentiment::new());
    registry.register_shared(weather);
    registry.register(Calculator::new());

    registry
}
