//! Web front end for the toolbox tools.
//!
//! Serves an HTMX form page for people and a JSON tool-call API for agents,
//! both backed by the same tool registry.

mod config;
mod error;
mod routes;
mod state;

use toolbox::{ToolPolicy, Weather};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,toolbox=debug,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        weather_api_key = config.weather.has_api_key(),
        "Starting toolbox web server"
    );

    let weather = Weather::new(config.weather.clone())?;

    let mut policy = ToolPolicy::default();
    if let Some(timeout) = config.tool_timeout {
        policy = policy.with_timeout(timeout);
    }

    // Build application state
    let state = AppState::new(weather, policy);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Toolbox web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
