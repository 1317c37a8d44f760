//! Mean sentiment over time, across the shards of a collection

use crate::{
    config::Columns,
    corpus::{Corpus, ScoredCorpus},
    progress::{ProgressConfig, ProgressReport, Work},
    resources::Resources,
    Result,
};
use anyhow::Context;
use globset::{Glob, GlobMatcher};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arithmetic mean of the sentiment scores of a corpus
///
/// Fails on an empty corpus, whose mean is undefined.
pub fn mean_score(scored: &ScoredCorpus<'_>) -> Result<f64> {
    anyhow::ensure!(
        !scored.is_empty(),
        "cannot compute the mean sentiment score of empty corpus {}",
        scored.corpus().name()
    );
    // Running mean, which stays exact when all scores are equal
    let mean = (scored.scores().iter())
        .enumerate()
        .fold(0.0, |mean, (idx, &score)| mean + (score - mean) / (idx + 1) as f64);
    Ok(mean)
}

/// Latest date of a corpus, i.e. its lexicographically greatest date
///
/// Fails on an empty corpus.
pub fn representative_date(corpus: &Corpus) -> Result<&str> {
    (corpus.records().iter())
        .map(|record| &*record.date)
        .max()
        .with_context(|| format!("cannot pick a date for empty corpus {}", corpus.name()))
}

/// Mean sentiment of a dataset at some date
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Representative date of the dataset
    pub date: Box<str>,

    /// Mean sentiment score of the dataset
    pub mean_score: f64,
}
//
impl SeriesPoint {
    /// Reduce a scored corpus to a single point
    pub fn summarize(scored: &ScoredCorpus<'_>) -> Result<Self> {
        Ok(Self {
            date: representative_date(scored.corpus())?.into(),
            mean_score: mean_score(scored)?,
        })
    }
}

/// Sequence of mean sentiment scores, one per dataset
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DatasetSeries {
    /// Name of the series, used as plot legend
    name: Box<str>,

    /// One point per dataset, in dataset order
    points: Vec<SeriesPoint>,
}
//
impl DatasetSeries {
    /// Set up an empty series
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Name of the series
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a point at the end
    pub fn push(&mut self, point: SeriesPoint) {
        self.points.push(point);
    }

    /// Points in dataset order
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points[..]
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Truth that the series has no point
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Day of the earliest and latest date (`YYYY-MM-DD`), if any
    pub fn date_range(&self) -> Option<(&str, &str)> {
        let dates = || self.points.iter().map(|point| day(&point.date));
        Some((dates().min()?, dates().max()?))
    }

    /// Pointwise difference with another series, dated like this one
    ///
    /// If the series do not have the same length, the longest one is
    /// truncated.
    pub fn difference(&self, other: &DatasetSeries) -> DatasetSeries {
        if self.len() != other.len() {
            log::warn!(
                "Comparing series {} and {} of different lengths {} and {}",
                self.name,
                other.name,
                self.len(),
                other.len()
            );
        }
        DatasetSeries {
            name: format!("{} - {}", self.name, other.name).into(),
            points: (self.points.iter())
                .zip(&other.points)
                .map(|(lhs, rhs)| SeriesPoint {
                    date: lhs.date.clone(),
                    mean_score: lhs.mean_score - rhs.mean_score,
                })
                .collect(),
        }
    }
}

/// Day part of an ISO-like timestamp
pub fn day(date: &str) -> &str {
    match date.char_indices().nth(10) {
        Some((end, _)) => &date[..end],
        None => date,
    }
}

/// Set of dataset shards sharing a file name suffix
///
/// Shard files are named `<anything>_<suffix>.json`, typically with a date
/// in place of `<anything>`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Collection {
    /// File name suffix of the shards
    suffix: Box<str>,

    /// Shard files, sorted by file name
    shards: Box<[PathBuf]>,
}
//
impl Collection {
    /// Find the shards of a collection in a directory
    ///
    /// Shards are sorted by file name, so that date-prefixed shards come out
    /// in chronological order whatever the directory listing order is.
    pub fn discover(dir: &Path, suffix: &str) -> Result<Self> {
        let matcher = shard_matcher(suffix)?;
        let context = || format!("listing collection {suffix:?} shards in {}", dir.display());
        let mut shards = Vec::new();
        for entry in std::fs::read_dir(dir).with_context(context)? {
            let entry = entry.with_context(context)?;
            let file_name = entry.file_name();
            if !matcher.is_match(Path::new(&file_name)) {
                continue;
            }
            if !entry.file_type().with_context(context)?.is_file() {
                log::debug!("Ignored non-file {:?} of collection {suffix:?}", entry.path());
                continue;
            }
            shards.push(entry.path());
        }
        shards.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        if shards.is_empty() {
            log::warn!(
                "Found no shard of collection {suffix:?} in {}",
                dir.display()
            );
        } else {
            log::info!("Found {} shards of collection {suffix:?}", shards.len());
        }
        Ok(Self {
            suffix: suffix.into(),
            shards: shards.into(),
        })
    }

    /// File name suffix of the shards
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Shard files, in discovery order
    pub fn shards(&self) -> &[PathBuf] {
        &self.shards[..]
    }

    /// Clean and score every shard independently, then reduce each of them
    /// to its mean score at its latest date
    pub fn series(
        &self,
        columns: &Columns,
        resources: &Resources,
        report: &ProgressReport,
    ) -> Result<DatasetSeries> {
        let progress = report.add(
            format!("Processing collection {}", self.suffix),
            ProgressConfig::new(Work::Steps(self.shards.len())).dont_show_rate_eta(),
        );
        let mut series = DatasetSeries::new(&*self.suffix);
        for shard in self.shards.iter() {
            let corpus = Corpus::load(shard, columns, report)?;
            let cleaned = corpus.clean(resources.cleaner(), report);
            log::debug!(
                "Shard {} has {} tokens after cleaning",
                corpus.name(),
                cleaned.iter().map(|tokens| tokens.len()).sum::<usize>()
            );
            let scored = corpus.score(resources.scorer(), report);
            let point = SeriesPoint::summarize(&scored)
                .with_context(|| format!("summarizing shard {}", corpus.name()))?;
            log::debug!("Shard {} summarized as {point:?}", corpus.name());
            series.push(point);
            progress.make_progress(1);
        }
        progress.finish();
        Ok(series)
    }
}

/// Glob matcher for the shard file names of a collection
fn shard_matcher(suffix: &str) -> Result<GlobMatcher> {
    let pattern = format!("*_{suffix}.json");
    Ok(Glob::new(&pattern)
        .with_context(|| format!("building shard pattern {pattern:?}"))?
        .compile_matcher())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Record;

    fn corpus(dates: &[&str]) -> Corpus {
        Corpus::new(
            "test",
            dates.iter().map(|&date| Record {
                content: "some text".into(),
                date: date.into(),
            }),
        )
    }

    #[test]
    fn mean_of_equal_scores_is_exact() {
        let corpus = corpus(&["a"; 7]);
        let scored = ScoredCorpus::with_scores(&corpus, vec![0.1; 7]).unwrap();
        assert_eq!(mean_score(&scored).unwrap(), 0.1);
    }

    #[test]
    fn mean_of_mixed_scores() {
        let corpus = corpus(&["a", "b", "c", "d"]);
        let scored = ScoredCorpus::with_scores(&corpus, vec![0.5, -0.5, 1.0, 0.0]).unwrap();
        assert!((mean_score(&scored).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_corpus_has_no_mean_nor_date() {
        let corpus = corpus(&[]);
        let scored = ScoredCorpus::with_scores(&corpus, Vec::<f64>::new()).unwrap();
        assert!(mean_score(&scored).is_err());
        assert!(representative_date(&corpus).is_err());
    }

    #[test]
    fn latest_date_is_lexicographic_max() {
        let corpus = corpus(&["2020-01-02T00:00:00", "2020-01-10T08:00:00", "2019-12-31T23:59:59"]);
        assert_eq!(representative_date(&corpus).unwrap(), "2020-01-10T08:00:00");
    }

    #[test]
    fn difference_and_range() {
        let mut lhs = DatasetSeries::new("csharp");
        let mut rhs = DatasetSeries::new("java");
        for (date, a, b) in [("2022-06-02T10:00:00", 0.5, 0.25), ("2022-06-01T23:00:00", 0.0, 0.5)] {
            lhs.push(SeriesPoint { date: date.into(), mean_score: a });
            rhs.push(SeriesPoint { date: date.into(), mean_score: b });
        }
        rhs.push(SeriesPoint { date: "2022-06-03".into(), mean_score: 0.0 });

        let diff = lhs.difference(&rhs);
        assert_eq!(diff.name(), "csharp - java");
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.points()[0].mean_score, 0.25);
        assert_eq!(diff.points()[1].mean_score, -0.5);
        assert_eq!(lhs.date_range(), Some(("2022-06-01", "2022-06-02")));
        assert_eq!(DatasetSeries::new("empty").date_range(), None);
    }

    #[test]
    fn day_extraction() {
        assert_eq!(day("2022-06-16T12:00:00+00:00"), "2022-06-16");
        assert_eq!(day("2022-06"), "2022-06");
    }

    #[test]
    fn shard_pattern() {
        let matcher = shard_matcher("java").unwrap();
        assert!(matcher.is_match("2022-06-01_java.json"));
        assert!(!matcher.is_match("java.json"));
        assert!(!matcher.is_match("2022-06-01_javascript.json"));
        assert!(!matcher.is_match("2022-06-01_java.json.bak"));
    }
}
