//! Exercise every built-in tool through the registry.
//!
//! Run with: cargo run -p toolbox --example try_tools
//!
//! Set WEATHER_API_KEY (or put it in .env) to try the live weather path.

use std::collections::HashMap;

use serde_json::{json, Value};
use toolbox::{default_registry, ToolRegistry, WeatherConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("toolbox=debug".parse()?),
        )
        .init();

    println!("=== Toolbox Test ===\n");

    let registry = default_registry(WeatherConfig::from_env()?)?;

    println!("Registered tools:");
    for tool in registry.descriptors() {
        println!("  - {}: {}", tool.name, tool.description);
    }
    println!();

    try_sentiment(&registry).await;
    try_weather(&registry).await;
    try_calculator(&registry).await;

    println!("\n=== Done ===");
    Ok(())
}

fn params(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap_or_default()
}

async fn try_sentiment(registry: &ToolRegistry) {
    println!("--- Sentiment ---");

    for text in ["I love this!", "This is not good at all", "The sky is blue"] {
        match registry
            .execute("sentiment_analysis", params(json!({ "text": text })))
            .await
        {
            Ok(result) => println!("  {:?} => {}", text, result.content),
            Err(e) => println!("  [ERROR] {:?} => {}", text, e),
        }
    }
    println!();
}

async fn try_weather(registry: &ToolRegistry) {
    println!("--- Weather ---");

    for (location, unit) in [("London,UK", "celsius"), ("Paris, FR", "fahrenheit")] {
        match registry
            .execute(
                "get_current_weather",
                params(json!({ "location": location, "unit": unit })),
            )
            .await
        {
            Ok(result) => println!("  {}", result.display_text()),
            Err(e) => println!("  [ERROR] {} => {}", location, e),
        }
    }

    match registry
        .execute("get_current_weather", params(json!({ "location": "" })))
        .await
    {
        Ok(_) => println!("  [FAIL] empty location should have failed"),
        Err(e) => println!("  [PASS] empty location: {}", e),
    }
    println!();
}

async fn try_calculator(registry: &ToolRegistry) {
    println!("--- Calculator ---");

    let cases = [
        (6.0, 7.0, "multiply"),
        (1.0, 4.0, "divide"),
        (5.0, 0.0, "divide"),
        (3.0, 4.0, "modulo"),
    ];

    for (a, b, op) in cases {
        let args = params(json!({ "operand1": a, "operand2": b, "operation": op }));
        match registry.execute("simple_calculator", args).await {
            Ok(result) => println!("  {} {} {} = {}", a, op, b, result.content),
            Err(e) => println!("  {} {} {} => error: {}", a, op, b, e),
        }
    }
}
