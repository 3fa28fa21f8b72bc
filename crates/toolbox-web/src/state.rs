//! Application state shared across handlers.

use std::sync::Arc;

use toolbox::{ToolInvoker, ToolPolicy, Weather};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Remote invocation boundary over the tool registry.
    pub invoker: Arc<ToolInvoker>,
    /// Weather tool, also used directly by the form and diagnostics.
    pub weather: Arc<Weather>,
}

impl AppState {
    /// Build state around a weather tool; the registry shares it.
    pub fn new(weather: Weather, policy: ToolPolicy) -> Self {
        let weather = Arc::new(weather);
        let registry = toolbox::registry_with_weather(weather.clone());
        Self {
            invoker: Arc::new(ToolInvoker::with_policy(Arc::new(registry), policy)),
            weather,
        }
    }
}
