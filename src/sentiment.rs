//! Sentiment polarity scoring
//!
//! Scores are VADER compound polarities, computed on the raw text since the
//! analyzer's heuristics rely on punctuation, capitalization and emphasis.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Lower bound of a compound polarity score
pub const MIN_SCORE: f64 = -1.0;

/// Upper bound of a compound polarity score
pub const MAX_SCORE: f64 = 1.0;

/// Lexicon and rule based sentiment scorer
#[derive(Clone, Copy, Debug, Default)]
pub struct SentimentScorer;
//
impl SentimentScorer {
    /// Set up the scorer
    pub fn new() -> Self {
        Self
    }

    /// Compound polarity of a raw text, within [`MIN_SCORE`, `MAX_SCORE`]
    ///
    /// Text without any word has a neutral score of 0. This includes text
    /// made only of ASCII punctuation, which the analyzer would otherwise
    /// score from its punctuation emphasis alone.
    pub fn score(&self, text: &str) -> f64 {
        if text
            .chars()
            .all(|c| c.is_whitespace() || c.is_ascii_punctuation())
        {
            return 0.0;
        }
        // The analyzer only borrows the global lexicon, built on first use
        let compound = SentimentIntensityAnalyzer::new()
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0);
        if compound.is_nan() {
            log::warn!("Sentiment analyzer produced NaN for {text:?}, treating as neutral");
            return 0.0;
        }
        compound.clamp(MIN_SCORE, MAX_SCORE)
    }

    /// Polarity of the sentiment expressed by a text
    pub fn polarity(&self, text: &str) -> Polarity {
        Polarity::of(self.score(text))
    }
}

/// Sign of a sentiment score
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Polarity {
    /// Score > 0
    Positive,

    /// Score < 0
    Negative,

    /// Score == 0
    Neutral,
}
//
impl Polarity {
    /// Classify a score
    pub fn of(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}
