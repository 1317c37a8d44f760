//! Linguistic resources used by the analysis
//!
//! Everything that needs to be built once before any text is processed lives
//! here, and is set up by a single explicit [`Resources::init()`] call.

use crate::{
    sentiment::{Polarity, SentimentScorer, MAX_SCORE, MIN_SCORE},
    text::TextCleaner,
    Result,
};
use anyhow::Context;

/// Ready-to-use text cleaner and sentiment scorer
#[derive(Clone, Debug)]
pub struct Resources {
    /// Text cleaning pipeline
    cleaner: TextCleaner,

    /// Sentiment scorer
    scorer: SentimentScorer,
}
//
impl Resources {
    /// Build and check all linguistic resources
    pub fn init() -> Result<Self> {
        let cleaner = TextCleaner::new().context("setting up the text cleaner")?;
        anyhow::ensure!(cleaner.num_stop_words() > 0, "stop-word list is empty");
        anyhow::ensure!(
            cleaner.lemmatizer().num_exceptions() > 0,
            "lemmatizer exception table is empty"
        );
        log::debug!(
            "Text cleaner ready with {} stop-words and {} irregular forms",
            cleaner.num_stop_words(),
            cleaner.lemmatizer().num_exceptions()
        );

        // Probe the sentiment lexicon, which is loaded on first use
        let scorer = SentimentScorer::new();
        for (probe, expected) in [("good", Polarity::Positive), ("bad", Polarity::Negative)] {
            let score = scorer.score(probe);
            anyhow::ensure!(
                (MIN_SCORE..=MAX_SCORE).contains(&score) && Polarity::of(score) == expected,
                "sentiment lexicon looks broken: {probe:?} scored {score}"
            );
        }
        log::debug!("Sentiment lexicon ready");

        Ok(Self { cleaner, scorer })
    }

    /// Text cleaning pipeline
    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    /// Sentiment scorer
    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }
}
