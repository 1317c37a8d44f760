//! Text reports about the sentiment of a corpus

use crate::{
    corpus::{ScoredCorpus, ScoredRecord},
    sentiment::Polarity,
};
use std::{
    fmt,
    io::{self, Write},
};

/// Banner that surrounds each printed record
const BANNER: &str = "==========================";

/// Records with a positive score, by decreasing score, up to `amount`
pub fn most_positive<'corpus>(
    scored: &ScoredCorpus<'corpus>,
    amount: usize,
) -> Vec<ScoredRecord<'corpus>> {
    ranked(scored, Polarity::Positive, amount)
}

/// Records with a negative score, up to `amount`
///
/// Like positive records, they are sorted by decreasing score, so the least
/// negative records come first.
pub fn most_negative<'corpus>(
    scored: &ScoredCorpus<'corpus>,
    amount: usize,
) -> Vec<ScoredRecord<'corpus>> {
    ranked(scored, Polarity::Negative, amount)
}

/// Records of a given polarity, by decreasing score then record order
fn ranked<'corpus>(
    scored: &ScoredCorpus<'corpus>,
    polarity: Polarity,
    amount: usize,
) -> Vec<ScoredRecord<'corpus>> {
    let mut rows = scored.rows_with(polarity).collect::<Vec<_>>();
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows.truncate(amount);
    rows
}

/// Print a titled list of records
pub fn write_records(
    mut out: impl Write,
    title: &str,
    rows: &[ScoredRecord<'_>],
) -> io::Result<()> {
    writeln!(out, "{title}")?;
    for row in rows {
        writeln!(out, "{BANNER}")?;
        writeln!(out, "Tweet {}, sentiment score: {}", row.index, row.score)?;
        writeln!(out, "{}", row.record.content)?;
        writeln!(out, "{BANNER}")?;
    }
    Ok(())
}

/// Descriptive statistics of a set of values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Describe {
    /// Number of values
    pub count: usize,

    /// Arithmetic mean
    pub mean: f64,

    /// Sample standard deviation, NaN with less than two values
    pub std: f64,

    /// Smallest value
    pub min: f64,

    /// First quartile
    pub q25: f64,

    /// Median
    pub q50: f64,

    /// Third quartile
    pub q75: f64,

    /// Largest value
    pub max: f64,
}
//
impl Describe {
    /// Compute statistics, or `None` if there is no value
    ///
    /// Quantiles are linearly interpolated between the closest ranks.
    pub fn new(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let sum_sq = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
            (sum_sq / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        let quantile = |q: f64| {
            let position = q * (count - 1) as f64;
            let (lo, hi) = (position.floor() as usize, position.ceil() as usize);
            sorted[lo] + (sorted[hi] - sorted[lo]) * (position - lo as f64)
        };
        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(0.25),
            q50: quantile(0.5),
            q75: quantile(0.75),
            max: sorted[count - 1],
        })
    }
}
//
impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "       sentiment_score")?;
        writeln!(f, "count  {:>15.6}", self.count as f64)?;
        for (name, value) in [
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ] {
            writeln!(f, "{name:<6} {value:>15.6}")?;
        }
        Ok(())
    }
}

/// Overview of the sentiment scores of a corpus
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentSummary {
    /// Number of records with a positive score
    pub positive: usize,

    /// Number of records with a negative score
    pub negative: usize,

    /// Total number of records
    pub total: usize,

    /// Distribution of the scores, if there is any record
    pub describe: Option<Describe>,
}
//
impl SentimentSummary {
    /// Summarize the scores of a corpus
    pub fn new(scored: &ScoredCorpus<'_>) -> Self {
        let polarity_count = |polarity: Polarity| {
            (scored.scores().iter())
                .filter(|&&score| Polarity::of(score) == polarity)
                .count()
        };
        Self {
            positive: polarity_count(Polarity::Positive),
            negative: polarity_count(Polarity::Negative),
            total: scored.len(),
            describe: Describe::new(scored.scores()),
        }
    }

    /// Fraction of records with a positive score
    pub fn positive_fraction(&self) -> f64 {
        self.positive as f64 / self.total as f64
    }

    /// Fraction of records with a negative score
    pub fn negative_fraction(&self) -> f64 {
        self.negative as f64 / self.total as f64
    }
}
//
impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tweets statistics:")?;
        writeln!(f, "{BANNER}")?;
        match &self.describe {
            Some(describe) => write!(f, "{describe}")?,
            None => writeln!(f, "No tweet")?,
        }
        writeln!(f, "Amount of positive tweets: {}", self.positive)?;
        writeln!(f, "Percentage: {}", self.positive_fraction())?;
        writeln!(f, "Amount of negative tweets: {}", self.negative)?;
        writeln!(f, "Percentage: {}", self.negative_fraction())?;
        writeln!(f, "{BANNER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, Record};

    fn corpus(contents: &[&str]) -> Corpus {
        Corpus::new(
            "test",
            contents.iter().map(|&content| Record {
                content: content.into(),
                date: "2020-01-01".into(),
            }),
        )
    }

    #[test]
    fn ranking_by_polarity() {
        let corpus = corpus(&["a", "b", "c", "d", "e", "f"]);
        let scored =
            ScoredCorpus::with_scores(&corpus, vec![0.2, -0.9, 0.7, 0.0, -0.1, 0.7]).unwrap();

        let positive = most_positive(&scored, 2);
        let indices = positive.iter().map(|row| row.index).collect::<Vec<_>>();
        assert_eq!(indices, [2, 5]);

        let negative = most_negative(&scored, 5);
        let indices = negative.iter().map(|row| row.index).collect::<Vec<_>>();
        assert_eq!(indices, [4, 1]);

        assert!(most_positive(&scored, 0).is_empty());
    }

    #[test]
    fn record_listing() {
        let corpus = corpus(&["I love it"]);
        let scored = ScoredCorpus::with_scores(&corpus, vec![0.5]).unwrap();
        let mut out = Vec::new();
        write_records(&mut out, "Most positive tweets:", &most_positive(&scored, 5)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!("Most positive tweets:\n{BANNER}\nTweet 0, sentiment score: 0.5\nI love it\n{BANNER}\n")
        );
    }

    #[test]
    fn descriptive_statistics() {
        let describe = Describe::new(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(describe.count, 4);
        assert_eq!(describe.mean, 2.5);
        assert!((describe.std - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(describe.min, 1.0);
        assert_eq!(describe.q25, 1.75);
        assert_eq!(describe.q50, 2.5);
        assert_eq!(describe.q75, 3.25);
        assert_eq!(describe.max, 4.0);

        let single = Describe::new(&[0.3]).unwrap();
        assert!(single.std.is_nan());
        assert_eq!(single.q75, 0.3);
        assert!(Describe::new(&[]).is_none());
    }

    #[test]
    fn sentiment_summary() {
        let corpus = corpus(&["a", "b", "c", "d"]);
        let scored = ScoredCorpus::with_scores(&corpus, vec![0.5, -0.5, 0.0, 0.25]).unwrap();
        let summary = SentimentSummary::new(&scored);
        assert_eq!((summary.positive, summary.negative, summary.total), (2, 1, 4));
        assert_eq!(summary.positive_fraction(), 0.5);
        assert_eq!(summary.negative_fraction(), 0.25);
        let text = summary.to_string();
        assert!(text.contains("Amount of positive tweets: 2"));
        assert!(text.contains("Percentage: 0.25"));
        assert!(text.contains("50%"));
    }
}
