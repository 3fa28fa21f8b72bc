//! Sentiment analysis tool.
//!
//! Scoring is delegated to a [`SentimentScorer`]; this module only maps the
//! polarity onto a qualitative [`Assessment`].

mod lexicon;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ToolError;
use crate::schema::{ParamKind, ParamSpec, ToolSchema};
use crate::tool::{Tool, ToolArgs, ToolOutput};

pub use lexicon::LexiconScorer;

/// Polarity above this is positive, below its negation negative.
pub const NEUTRAL_BAND: f64 = 0.1;

/// Raw scores produced by a scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    /// Valence in [-1, 1].
    pub polarity: f64,
    /// Opinion vs fact in [0, 1].
    pub subjectivity: f64,
}

/// Something that can score text. Failures propagate to the caller.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentScore, ToolError>;
}

/// Qualitative bucket for a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assessment {
    Positive,
    Neutral,
    Negative,
}

impl Assessment {
    /// Strict thresholds: ±0.1 themselves are neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > NEUTRAL_BAND {
            Assessment::Positive
        } else if polarity < -NEUTRAL_BAND {
            Assessment::Negative
        } else {
            Assessment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Positive => "positive",
            Assessment::Neutral => "neutral",
            Assessment::Negative => "negative",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub subjectivity: f64,
    pub assessment: Assessment,
}

impl From<SentimentScore> for SentimentResult {
    fn from(score: SentimentScore) -> Self {
        Self {
            polarity: score.polarity,
            subjectivity: score.subjectivity,
            assessment: Assessment::from_polarity(score.polarity),
        }
    }
}

/// Analyze text with the built-in [`LexiconScorer`].
pub fn analyze(text: &str) -> Result<SentimentResult, ToolError> {
    analyze_with(&LexiconScorer::new(), text)
}

/// Analyze text with the given scorer.
pub fn analyze_with(scorer: &dyn SentimentScorer, text: &str) -> Result<SentimentResult, ToolError> {
    let score = scorer.score(text)?;
    debug!(
        polarity = score.polarity,
        subjectivity = score.subjectivity,
        "Scored {} chars",
        text.len()
    );
    Ok(score.into())
}

/// Sentiment analysis tool.
///
/// # Parameters
///
/// - `text` (required): The text to analyze. May be empty.
///
/// Returns `{"polarity": .., "subjectivity": .., "assessment": "positive"|"neutral"|"negative"}`.
pub struct Sentiment {
    scorer: Arc<dyn SentimentScorer>,
}

impl Sentiment {
    /// Create the tool with the built-in lexicon scorer.
    pub fn new() -> Self {
        Self::with_scorer(Arc::new(LexiconScorer::new()))
    }

    pub fn with_scorer(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn analyze(&self, text: &str) -> Result<SentimentResult, ToolError> {
        analyze_with(self.scorer.as_ref(), text)
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for Sentiment {
    fn name(&self) -> &str {
        "sentiment_analysis"
    }

    fn description(&self) -> &str {
        "Performs sentiment analysis on the input text, returning polarity, \
         subjectivity, and a qualitative assessment."
    }

    fn parameters(&self) -> ToolSchema {
        ToolSchema::new().param(ParamSpec::required(
            "text",
            ParamKind::String,
            "The text to analyze",
        ))
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let text = args.get_string("text")?;
        let result = self.analyze(&text)?;
        ToolOutput::json(&result)
    }
}
