//! Text cleaning: from raw tweet contents to lemmatized tokens

pub mod lemma;
pub mod stopwords;

use crate::{Result, Token, TokenSequence};
use anyhow::Context;
use lemma::Lemmatizer;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// User mentions and links, replaced by a space in a first pass
pub const MENTION_LINK_PATTERN: &str = r"@[a-z0-9_]+|\w+://\S+";

/// Anything that isn't an ASCII lowercase letter or digit, replaced by a space
/// once mentions and links are gone
///
/// This knowingly discards all non-ASCII letters.
pub const NOISE_PATTERN: &str = r"[^a-z0-9]+";

/// Tokens with fewer characters than this are dropped
pub const MIN_TOKEN_CHARS: usize = 3;

/// Tweet content cleaner
#[derive(Clone, Debug)]
pub struct TextCleaner {
    /// Compiled [`MENTION_LINK_PATTERN`]
    mentions_links: Regex,

    /// Compiled [`NOISE_PATTERN`]
    noise: Regex,

    /// Words that carry too little information to be kept
    stop_words: &'static HashSet<&'static str>,

    /// Reduction of words to their base form
    lemmatizer: Lemmatizer,
}
//
impl TextCleaner {
    /// Set up a cleaner with the English stop-word list
    pub fn new() -> Result<Self> {
        Ok(Self {
            mentions_links: Regex::new(MENTION_LINK_PATTERN)
                .context("compiling the mention and link pattern")?,
            noise: Regex::new(NOISE_PATTERN).context("compiling the text noise pattern")?,
            stop_words: stopwords::english(),
            lemmatizer: Lemmatizer::new(),
        })
    }

    /// Turn a raw text into a sequence of lemmatized tokens
    ///
    /// The output can be empty, e.g. for text that only contains stop-words
    /// and punctuation.
    pub fn clean(&self, text: &str) -> TokenSequence {
        let text = self.strip_noise(text);
        text.unicode_words()
            .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|word| !self.is_stop_word(word))
            .map(|word| Token::from(self.lemmatizer.lemmatize(word)))
            .collect()
    }

    /// Lowercase the text, replace noise with spaces and trim the result
    ///
    /// Mentions and links go first, otherwise the separator before them would
    /// be taken for noise and leave them behind as words.
    pub fn strip_noise(&self, text: &str) -> String {
        let lowercase = text.to_lowercase();
        let without_mentions = self.mentions_links.replace_all(&lowercase, " ");
        self.noise.replace_all(&without_mentions, " ").trim().to_owned()
    }

    /// Truth that a lowercase word is a stop-word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of known stop-words
    pub fn num_stop_words(&self) -> usize {
        self.stop_words.len()
    }

    /// Access the lemmatizer
    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }
}
