//! Route handlers for the web interface.

pub mod diagnostics;
pub mod forms;
pub mod health;
pub mod tools;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages and form fragments
        .route("/", get(forms::index_page))
        .route("/forms/sentiment", post(forms::sentiment_form))
        .route("/forms/weather", post(forms::weather_form))
        .route("/forms/calculator", post(forms::calculator_form))
        // Health check
        .route("/health", get(health::health))
        // Tool-call API
        .route("/api/tools", get(tools::list_api))
        .route("/api/tools/:name", post(tools::invoke_api))
        .route("/api/call", post(tools::call_api))
        // Diagnostics
        .route("/api/diagnostics", get(diagnostics::environment_api))
        .route("/api/diagnostics/weather", get(diagnostics::weather_probe_api))
}
