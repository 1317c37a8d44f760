//! Select the most frequent tokens of a corpus

use crate::{
    corpus::ScoredCorpus,
    progress::{ProgressConfig, ProgressReport, Work},
    sentiment::Polarity,
    stats::{FrequencyTable, TokenStats},
    text::TextCleaner,
    TokenSequence,
};
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};

/// Token along with its number of occurences
pub type RankedToken<'table> = (&'table str, usize);

/// Pick the `n` most frequent tokens, then leave out the `skip` first ones
///
/// Tokens come out by decreasing occurence count, equally frequent tokens
/// being ordered by first occurence.
pub fn top(table: &FrequencyTable, n: usize, skip: usize) -> Vec<RankedToken<'_>> {
    if n == 0 {
        return Vec::new();
    }

    // Find the top tokens using a min-heap of bounded size...
    let mut heap = BinaryHeap::with_capacity(n + 1);
    for (token, stats) in table.iter() {
        heap.push((Reverse(stats), token));
        if heap.len() > n {
            heap.pop();
        }
    }

    // ...then collect them in order of decreasing popularity, which requires
    // an order reversal since we used a min-heap.
    let mut result = VecDeque::with_capacity(heap.len());
    while let Some((Reverse(stats), token)) = heap.pop() {
        result.push_front((token, stats));
    }
    (result.into_iter())
        .skip(skip)
        .map(|(token, stats): (&str, TokenStats)| (token, stats.count().get()))
        .collect()
}

/// Token frequencies of the records whose sentiment has a certain polarity
///
/// Record contents are cleaned again from their raw text, so this does not
/// depend on any previous cleaning of the corpus.
pub fn frequency_by_sentiment(
    scored: &ScoredCorpus<'_>,
    polarity: Polarity,
    cleaner: &TextCleaner,
    report: &ProgressReport,
) -> FrequencyTable {
    let rows = scored.rows_with(polarity).collect::<Vec<_>>();
    let progress = report.add(
        format!("Cleaning {polarity:?} records of {}", scored.corpus().name()),
        ProgressConfig::new(Work::PercentSteps(rows.len())),
    );
    let cleaned = (rows.iter())
        .map(|row| {
            let tokens = cleaner.clean(&row.record.content);
            progress.make_progress(1);
            tokens
        })
        .collect::<Vec<TokenSequence>>();
    progress.finish();
    log::debug!(
        "{} has {} {polarity:?} records out of {}",
        scored.corpus().name(),
        cleaned.len(),
        scored.len()
    );
    FrequencyTable::from_sequences(cleaned.iter().map(|tokens| &tokens[..]))
}
