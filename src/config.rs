//! Processing pipeline configuration

use crate::{
    plot::color::{Color, Gradient},
    Result,
};
use serde::Serialize;
use std::{num::NonZeroUsize, path::PathBuf};

/// Final process configuration
///
/// Starts from the [reference configuration](Config::reference), which
/// command line arguments may then override.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Config {
    /// Directory where datasets and collection shards are looked up
    pub data_dir: PathBuf,

    /// Directory where plots are written
    pub output_dir: PathBuf,

    /// Names of the JSON fields that records are built from
    pub columns: Columns,

    /// Datasets to be analyzed, in order
    pub datasets: Box<[DatasetInfo]>,

    /// Line colors of the cross-dataset comparison plots
    pub comparison_palette: [Color; 2],

    /// Number of most frequent words that are looked up
    pub top_words: NonZeroUsize,

    /// Number of leading most frequent words that are left out of the display
    ///
    /// The most frequent word is usually the name of the language that the
    /// dataset was selected by, which is why one word is skipped by default.
    pub skipped_top_words: usize,

    /// Number of most positive/negative records that are printed
    pub report_records: usize,

    /// Truth that plots should be rendered
    pub render_plots: bool,
}
//
impl Config {
    /// Configuration of the C# vs Java analysis
    pub fn reference() -> Result<Self> {
        let datasets = REFERENCE_DATASETS
            .iter()
            .map(|&(prefix, start, end)| {
                Ok(DatasetInfo {
                    prefix: prefix.into(),
                    gradient: Gradient::from_hex(start, end)?,
                })
            })
            .collect::<Result<Box<[_]>>>()?;
        Ok(Self {
            data_dir: "data".into(),
            output_dir: "plots".into(),
            columns: Columns::default(),
            datasets,
            comparison_palette: [
                Color::from_hex(REFERENCE_PALETTE[0])?,
                Color::from_hex(REFERENCE_PALETTE[1])?,
            ],
            top_words: NonZeroUsize::new(20).expect("20 is not zero"),
            skipped_top_words: 1,
            report_records: 5,
            render_plots: true,
        })
    }

    /// Location of the single-file dataset associated with a prefix
    pub fn dataset_path(&self, dataset: &DatasetInfo) -> PathBuf {
        self.data_dir.join(format!("{}.json", dataset.prefix))
    }

    /// Check that the configuration makes sense
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.skipped_top_words < self.top_words.get(),
            "skipping {} of the top {} words would leave nothing to display",
            self.skipped_top_words,
            self.top_words
        );
        anyhow::ensure!(!self.datasets.is_empty(), "no dataset to analyze");
        for dataset in self.datasets.iter() {
            anyhow::ensure!(
                !dataset.prefix.is_empty()
                    && !dataset.prefix.contains(['/', '\\', '*', '?', '[', '{']),
                "dataset prefix {:?} is not a plain file name",
                dataset.prefix
            );
        }
        anyhow::ensure!(
            self.columns.content != self.columns.date,
            "content and date must come from different columns"
        );
        Ok(())
    }
}

/// Names of the JSON fields that records are built from
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Columns {
    /// Text of the tweet
    pub content: Box<str>,

    /// Timestamp of the tweet, in a lexicographically sortable format
    pub date: Box<str>,
}
//
impl Default for Columns {
    fn default() -> Self {
        Self {
            content: "content".into(),
            date: "date".into(),
        }
    }
}

/// What we know about one of the analyzed datasets
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetInfo {
    /// File name prefix of the dataset, which is also the file name suffix of
    /// its collection shards
    pub prefix: Box<str>,

    /// Colors of the frequency distribution bars
    pub gradient: Gradient,
}

/// Prefix and gradient endpoints of the reference datasets
const REFERENCE_DATASETS: &[(&str, &str, &str)] = &[
    ("csharp", "#682876", "#B366AB"),
    ("java", "#5382A1", "#F89820"),
];

/// Line colors of the reference comparison plots
const REFERENCE_PALETTE: [&str; 2] = ["#B366AB", "#F89820"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn reference_configuration() {
        let config = Config::reference().unwrap();
        config.validate().unwrap();
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(&*config.datasets[0].prefix, "csharp");
        assert_eq!(config.datasets[1].gradient.end.to_string(), "#F89820");
        assert_eq!(config.comparison_palette[0].to_string(), "#B366AB");
        assert_eq!(config.top_words.get(), 20);
        assert_eq!(config.skipped_top_words, 1);
        assert_eq!(
            config.dataset_path(&config.datasets[1]),
            Path::new("data").join("java.json")
        );
    }

    #[test]
    fn skipping_everything_is_rejected() {
        let config = Config {
            top_words: NonZeroUsize::new(3).unwrap(),
            skipped_top_words: 3,
            ..Config::reference().unwrap()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn glob_prefixes_are_rejected() {
        let mut config = Config::reference().unwrap();
        config.datasets[0].prefix = "*".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn serializes_colors_as_hex() {
        let config = Config::reference().unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["datasets"][0]["gradient"]["start"], "#682876");
        assert_eq!(json["columns"]["date"], "date");
    }
}
