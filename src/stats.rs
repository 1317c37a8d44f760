//! Token usage statistics

use crate::Token;
use std::{
    cmp::Ordering,
    collections::{hash_map, HashMap},
    num::NonZeroUsize,
};

/// Cumulative knowledge about a token
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TokenStats {
    /// Total number of occurences
    count: NonZeroUsize,

    /// Position of the first occurence in the flattened token stream
    first_seen: usize,
}
//
impl TokenStats {
    /// Set up statistics from a first occurence
    pub fn new(first_seen: usize) -> Self {
        Self {
            count: NonZeroUsize::MIN,
            first_seen,
        }
    }

    /// Record another occurence
    pub fn add_occurence(&mut self) {
        self.count = self
            .count
            .checked_add(1)
            .expect("overflow while counting token occurences");
    }

    /// Number of occurences
    pub fn count(&self) -> NonZeroUsize {
        self.count
    }

    /// Position of the first occurence in the flattened token stream
    pub fn first_seen(&self) -> usize {
        self.first_seen
    }
}
//
/// More frequent tokens compare greater, and among equally frequent tokens
/// the one that was seen first compares greater
impl Ord for TokenStats {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.count.cmp(&other.count) {
            Ordering::Greater => return Ordering::Greater,
            Ordering::Less => return Ordering::Less,
            Ordering::Equal => {}
        }
        other.first_seen.cmp(&self.first_seen)
    }
}
//
impl PartialOrd for TokenStats {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Occurence counts of the tokens of a corpus
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrequencyTable {
    /// Statistics of each distinct token
    stats: HashMap<Token, TokenStats>,

    /// Total number of token occurences
    total: usize,
}
//
impl FrequencyTable {
    /// Set up an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tokens of a set of token sequences
    ///
    /// Sequences are flattened in iteration order, which defines the
    /// first-seen order of tokens.
    pub fn from_sequences<'seq>(
        sequences: impl IntoIterator<Item = &'seq [Token]>,
    ) -> Self {
        let mut table = Self::new();
        for token in sequences.into_iter().flatten() {
            table.add_token(token.clone());
        }
        table
    }

    /// Record an occurence of a token
    pub fn add_token(&mut self, token: Token) {
        let position = self.total;
        self.total += 1;
        match self.stats.entry(token) {
            hash_map::Entry::Occupied(o) => o.into_mut().add_occurence(),
            hash_map::Entry::Vacant(v) => {
                log::trace!("First occurence of {:?} at position {position}", v.key());
                v.insert(TokenStats::new(position));
            }
        }
    }

    /// Number of occurences of a token
    pub fn count(&self, token: &str) -> usize {
        self.stats.get(token).map_or(0, |stats| stats.count.get())
    }

    /// Total number of recorded occurences
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Truth that no token has been recorded
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Iterate over tokens and their statistics, in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenStats)> + '_ {
        self.stats.iter().map(|(token, stats)| (&**token, *stats))
    }
}

/// Count the tokens of a set of token sequences
pub fn frequency<'seq>(sequences: impl IntoIterator<Item = &'seq [Token]>) -> FrequencyTable {
    FrequencyTable::from_sequences(sequences)
}
