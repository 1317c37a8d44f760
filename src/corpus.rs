//! Tweet datasets, as loaded from newline-delimited JSON files

use crate::{
    config::Columns,
    progress::{ProgressConfig, ProgressReport, Work},
    sentiment::{Polarity, SentimentScorer},
    text::TextCleaner,
    Result, TokenSequence,
};
use anyhow::Context;
use serde_json::{Map, Value};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Tweet from a dataset
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    /// Raw text of the tweet
    pub content: Box<str>,

    /// Publication timestamp, in a lexicographically sortable format
    pub date: Box<str>,
}

/// Ordered set of tweets from one source
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Corpus {
    /// Human-readable name of the source, used in logs and progress bars
    name: Box<str>,

    /// Records, in source order
    records: Box<[Record]>,
}
//
impl Corpus {
    /// Build a corpus from in-memory records
    pub fn new(name: impl Into<Box<str>>, records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            name: name.into(),
            records: records.into_iter().collect(),
        }
    }

    /// Load a corpus from a newline-delimited JSON file
    ///
    /// Every non-blank line must be a JSON object with string fields named
    /// after the configured columns. The first line that doesn't comply
    /// aborts the whole load.
    pub fn load(path: &Path, columns: &Columns, report: &ProgressReport) -> Result<Self> {
        let name = path.display().to_string();
        let file = File::open(path).with_context(|| format!("opening dataset {name}"))?;
        let file_len = file
            .metadata()
            .with_context(|| format!("querying the size of dataset {name}"))?
            .len();
        let progress = report.add(
            format!("Loading {name}"),
            ProgressConfig::new(Work::Bytes(file_len)),
        );

        // Parse the file line by line
        let mut reader = BufReader::new(file);
        let mut records = Vec::new();
        let mut line = String::new();
        for line_number in 1.. {
            line.clear();
            let num_bytes = reader
                .read_line(&mut line)
                .with_context(|| format!("reading line {line_number} of {name}"))?;
            if num_bytes == 0 {
                break;
            }
            progress.make_progress(num_bytes as u64);
            if line.trim().is_empty() {
                log::trace!("Skipped blank line {line_number} of {name}");
                continue;
            }
            let record = parse_record(&line, columns)
                .with_context(|| format!("parsing line {line_number} of {name}"))?;
            records.push(record);
        }
        progress.finish();
        log::debug!("Loaded {} records from {name}", records.len());
        Ok(Self::new(name, records))
    }

    /// Name of the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records in source order
    pub fn records(&self) -> &[Record] {
        &self.records[..]
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Truth that there is no record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clean the content of every record
    ///
    /// Token sequences come out in record order.
    pub fn clean(&self, cleaner: &TextCleaner, report: &ProgressReport) -> Box<[TokenSequence]> {
        let progress = report.add(
            format!("Cleaning {}", self.name),
            ProgressConfig::new(Work::PercentSteps(self.len())),
        );
        let cleaned = (self.records.iter())
            .map(|record| {
                let tokens = cleaner.clean(&record.content);
                log::trace!("Cleaned {:?} into {tokens:?}", record.content);
                progress.make_progress(1);
                tokens
            })
            .collect();
        progress.finish();
        cleaned
    }

    /// Score the sentiment of every record's raw content
    pub fn score(&self, scorer: &SentimentScorer, report: &ProgressReport) -> ScoredCorpus<'_> {
        let progress = report.add(
            format!("Scoring {}", self.name),
            ProgressConfig::new(Work::PercentSteps(self.len())),
        );
        let scores = (self.records.iter())
            .map(|record| {
                let score = scorer.score(&record.content);
                progress.make_progress(1);
                score
            })
            .collect();
        progress.finish();
        ScoredCorpus {
            corpus: self,
            scores,
        }
    }
}

/// Sentiment-scored view of a [`Corpus`]
///
/// Holds exactly one score per record, in record order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCorpus<'corpus> {
    /// Source corpus
    corpus: &'corpus Corpus,

    /// Sentiment score of each record
    scores: Box<[f64]>,
}
//
impl<'corpus> ScoredCorpus<'corpus> {
    /// Pair a corpus with precomputed scores
    ///
    /// Returns `None` if there isn't exactly one score per record.
    pub fn with_scores(corpus: &'corpus Corpus, scores: impl Into<Box<[f64]>>) -> Option<Self> {
        let scores = scores.into();
        (scores.len() == corpus.len()).then_some(Self { corpus, scores })
    }

    /// Source corpus
    pub fn corpus(&self) -> &'corpus Corpus {
        self.corpus
    }

    /// Scores in record order
    pub fn scores(&self) -> &[f64] {
        &self.scores[..]
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Truth that there is no record
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate over records with their index in the corpus and their score
    pub fn rows(&self) -> impl Iterator<Item = ScoredRecord<'corpus>> + '_ {
        (self.corpus.records.iter())
            .zip(self.scores.iter().copied())
            .enumerate()
            .map(|(index, (record, score))| ScoredRecord {
                index,
                record,
                score,
            })
    }

    /// Iterate over the records whose score has a certain polarity
    pub fn rows_with(&self, polarity: Polarity) -> impl Iterator<Item = ScoredRecord<'corpus>> + '_ {
        self.rows().filter(move |row| Polarity::of(row.score) == polarity)
    }
}

/// Record from a [`ScoredCorpus`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredRecord<'corpus> {
    /// Position of the record in the corpus
    pub index: usize,

    /// Record data
    pub record: &'corpus Record,

    /// Sentiment score
    pub score: f64,
}

/// Extract the configured columns from a JSON line
fn parse_record(line: &str, columns: &Columns) -> Result<Record> {
    let object = serde_json::from_str::<Map<String, Value>>(line)
        .context("line is not a JSON object")?;
    let column = |name: &str| -> Result<Box<str>> {
        match object.get(name) {
            Some(Value::String(s)) => Ok(s.as_str().into()),
            Some(other) => anyhow::bail!("column {name:?} is not a string but {other}"),
            None => anyhow::bail!("column {name:?} is missing"),
        }
    };
    Ok(Record {
        content: column(&columns.content)?,
        date: column(&columns.date)?,
    })
}
