//! Built-in tool implementations.

mod calculator;
mod sentiment;
mod weather;

pub use calculator::{calculate, Calculator, Operation};
pub use sentiment::{
    analyze, analyze_with, Assessment, LexiconScorer, Sentiment, SentimentResult,
    SentimentScore, SentimentScorer, NEUTRAL_BAND,
};
pub use weather::{
    mock_report, FallbackReason, TemperatureUnit, Weather, WeatherOutcome, WeatherReport,
    MOCK_BASE_CELSIUS, MOCK_CONDITIONS,
};
