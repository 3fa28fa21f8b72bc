//! Word-lexicon sentiment scorer.
//!
//! Each known word carries a polarity and a subjectivity. A directly
//! preceding intensifier scales the word, a negation up to two tokens back
//! flips it at half strength, and the text scores the mean of its matches.

use std::collections::HashMap;

use super::{SentimentScore, SentimentScorer};
use crate::error::ToolError;

/// Polarity factor applied to negated words.
const NEGATION_FACTOR: f64 = -0.5;

/// How many tokens back a negation still applies.
const NEGATION_WINDOW: usize = 2;

// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("boring", -1.0, 1.0),
    ("brilliant", 0.9, 1.0),
    ("broken", -0.4, 0.4),
    ("cheap", 0.4, 0.7),
    ("clean", 0.37, 0.69),
    ("cool", 0.35, 0.65),
    ("delightful", 1.0, 1.0),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("dirty", -0.6, 0.8),
    ("easy", 0.43, 0.83),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("excellent", 1.0, 1.0),
    ("excited", 0.38, 0.75),
    ("fantastic", 0.4, 0.9),
    ("fine", 0.42, 0.5),
    ("fun", 0.3, 0.2),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hard", -0.29, 0.54),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("helpful", 0.5, 0.5),
    ("horrible", -1.0, 1.0),
    ("interesting", 0.5, 0.5),
    ("like", 0.2, 0.4),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("mediocre", -0.3, 0.6),
    ("nice", 0.6, 1.0),
    ("okay", 0.5, 0.5),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.73, 0.97),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("slow", -0.3, 0.39),
    ("stupid", -0.8, 1.0),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("unhappy", -0.6, 0.9),
    ("useful", 0.3, 0.0),
    ("useless", -0.5, 0.2),
    ("wonderful", 1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("slightly", 0.5),
    ("so", 1.2),
    ("somewhat", 0.7),
    ("totally", 1.3),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &[
    "aren't", "can't", "cannot", "didn't", "doesn't", "don't", "isn't", "never", "no", "nor",
    "not", "wasn't", "won't", "wouldn't",
];

/// Built-in scorer backed by a small English word lexicon.
pub struct LexiconScorer {
    words: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .map(|t| t.trim_matches('\'').to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentScore, ToolError> {
        let tokens = Self::tokenize(text);
        let mut matches = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.words.get(token.as_str()) else {
                continue;
            };

            if let Some(factor) = i
                .checked_sub(1)
                .and_then(|prev| self.intensifiers.get(tokens[prev].as_str()))
            {
                polarity = (polarity * factor).clamp(-1.0, 1.0);
                subjectivity = (subjectivity * factor).clamp(0.0, 1.0);
            }

            let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|t| NEGATIONS.contains(&t.as_str()));
            if negated {
                polarity *= NEGATION_FACTOR;
            }

            matches.push((polarity, subjectivity));
        }

        if matches.is_empty() {
            return Ok(SentimentScore {
                polarity: 0.0,
                subjectivity: 0.0,
            });
        }

        let n = matches.len() as f64;
        let polarity = matches.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = matches.iter().map(|(_, s)| s).sum::<f64>() / n;

        Ok(SentimentScore {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        })
    }
}
