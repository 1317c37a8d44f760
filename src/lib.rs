//! Sentiment and word usage analysis of tweets about programming languages
//!
//! Each dataset is a newline-delimited JSON file of tweets. Tweet contents go
//! through two independent paths:
//!
//! - The [`text`] cleaner turns them into lemmatized tokens, which are then
//!   counted into [frequency tables](stats::FrequencyTable) and ranked by
//!   [`top`].
//! - The [`sentiment`] scorer assigns a compound polarity to the raw text,
//!   which is then reduced into [time series](series::DatasetSeries) of mean
//!   scores across the daily shards of a [collection](series::Collection).
//!
//! The [`summary`] and [`plot`] modules only consume finished aggregates.

pub mod config;
pub mod corpus;
pub mod plot;
pub mod progress;
pub mod resources;
pub mod sentiment;
pub mod series;
pub mod stats;
pub mod summary;
pub mod text;
pub mod top;

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Cleaned and lemmatized word
pub type Token = Box<str>;

/// Cleaned tokens of one record, in text order
pub type TokenSequence = Box<[Token]>;
