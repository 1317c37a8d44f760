//! Compare how people feel about programming languages on Twitter
//!
//! Each configured dataset is a newline-delimited JSON dump of tweets about
//! one language. This program reports its word frequencies and sentiment
//! scores, then tracks the mean sentiment over the daily shards of each
//! dataset and compares the languages with each other.

use anyhow::Context;
use clap::Parser;
use lang_mood::{
    config::{Config, DatasetInfo},
    corpus::{Corpus, ScoredCorpus},
    plot::{self, Plotter},
    progress::ProgressReport,
    resources::Resources,
    sentiment::Polarity,
    series::{Collection, DatasetSeries},
    stats, summary,
    summary::SentimentSummary,
    top, Result,
};
use log::LevelFilter;
use std::{
    io::{BufWriter, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

/// Word frequency and sentiment analysis of tweets about programming
/// languages
///
/// Without any option, the C# and Java datasets are looked up in the `data`
/// directory and plots are written to the `plots` directory.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Directory where datasets and their daily shards are stored
    ///
    /// Dataset `<name>` is read from `<name>.json`, and its shards are all
    /// the `*_<name>.json` files of this directory.
    #[arg(short, long, default_value = None)]
    data_dir: Option<PathBuf>,

    /// Directory where plots are written, created if needed
    #[arg(short, long, default_value = None)]
    output_dir: Option<PathBuf>,

    /// Number of most frequent words that are looked up in each dataset
    #[arg(short, long, default_value = None)]
    top_words: Option<NonZeroUsize>,

    /// Number of leading most frequent words that are not displayed
    ///
    /// The most frequent word of a dataset is usually the name of the
    /// language that tweets were selected by, which is why it is skipped by
    /// default.
    #[arg(short, long, default_value = None)]
    skip_top_words: Option<usize>,

    /// Number of most positive and most negative tweets that are printed
    #[arg(short, long, default_value = None)]
    report_records: Option<usize>,

    /// Only print text reports, do not render any plot
    #[arg(long, default_value_t = false)]
    no_plots: bool,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        if let (Some(top_words), Some(skip_top_words)) = (args.top_words, args.skip_top_words) {
            anyhow::ensure!(
                skip_top_words < top_words.get(),
                "skipping {skip_top_words} of the top {top_words} words would leave nothing to display"
            );
        }
        Ok(args)
    }

    /// Apply these arguments on top of the reference configuration
    pub fn into_config(self) -> Result<Config> {
        let reference = Config::reference()?;
        let config = Config {
            data_dir: self.data_dir.unwrap_or(reference.data_dir),
            output_dir: self.output_dir.unwrap_or(reference.output_dir),
            top_words: self.top_words.unwrap_or(reference.top_words),
            skipped_top_words: self.skip_top_words.unwrap_or(reference.skipped_top_words),
            report_records: self.report_records.unwrap_or(reference.report_records),
            render_plots: reference.render_plots && !self.no_plots,
            ..reference
        };
        config.validate()?;
        Ok(config)
    }
}
//
fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let config = Args::parse_and_check()?.into_config()?;
    log::debug!("Using configuration {}", serde_json::to_string(&config)?);

    // Set up linguistic resources and progress reporting
    let resources = Resources::init().inspect_err(|e| {
        log::error!("Failed to set up linguistic resources: {e:#}");
    })?;
    let report = ProgressReport::new();
    let plotter = if config.render_plots {
        Some(Plotter::new(&config.output_dir)?)
    } else {
        None
    };

    // Analyze each dataset on its own
    for dataset in config.datasets.iter() {
        analyze_dataset(&config, dataset, &resources, &report, plotter.as_ref())
            .with_context(|| format!("analyzing dataset {}", dataset.prefix))?;
    }

    // Track the mean sentiment of each dataset over time
    let mut all_series = Vec::with_capacity(config.datasets.len());
    for dataset in config.datasets.iter() {
        log::info!("Computing the sentiment time series of {}", dataset.prefix);
        let collection = Collection::discover(&config.data_dir, &dataset.prefix)?;
        let series = collection
            .series(&config.columns, &resources, &report)
            .with_context(|| format!("computing the time series of {}", dataset.prefix))?;
        all_series.push(series);
    }

    // Compare the datasets
    if let Some(plotter) = &plotter {
        plot_comparisons(&config, &all_series, plotter)?;
    }
    Ok(())
}

/// Frequency and sentiment reports of a single dataset
fn analyze_dataset(
    config: &Config,
    dataset: &DatasetInfo,
    resources: &Resources,
    report: &ProgressReport,
    plotter: Option<&Plotter>,
) -> Result<()> {
    let prefix = &dataset.prefix;
    let path = config.dataset_path(dataset);
    log::info!("Analyzing dataset {}", path.display());
    let corpus = Corpus::load(&path, &config.columns, report)?;

    // Word frequencies of the whole dataset
    let cleaned = corpus.clean(resources.cleaner(), report);
    let frequencies = stats::frequency(cleaned.iter().map(|tokens| &tokens[..]));
    log::debug!(
        "{} has {} distinct tokens out of {}",
        corpus.name(),
        frequencies.len(),
        frequencies.total()
    );
    let top_words = config.top_words.get();
    let ranked = top::top(&frequencies, top_words, config.skipped_top_words);
    log::debug!("Top tokens of {}: {ranked:?}", corpus.name());
    if let Some(plotter) = plotter {
        plotter.plot_frequencies(
            &format!("{prefix}_frequency.svg"),
            &ranked,
            top_words,
            &dataset.gradient,
            &plot::frequency_title(&path),
        )?;
    }

    // Sentiment scores, and word frequencies by sentiment
    let scored = corpus.score(resources.scorer(), report);
    for (polarity, name) in [(Polarity::Positive, "positive"), (Polarity::Negative, "negative")] {
        let frequencies =
            top::frequency_by_sentiment(&scored, polarity, resources.cleaner(), report);
        let ranked = top::top(&frequencies, top_words, config.skipped_top_words);
        log::debug!("Top {name} tokens of {}: {ranked:?}", corpus.name());
        if let Some(plotter) = plotter {
            plotter.plot_frequencies(
                &format!("{prefix}_{name}_frequency.svg"),
                &ranked,
                top_words,
                &dataset.gradient,
                &format!("{name} sentences frequency distribution"),
            )?;
        }
    }

    // Text reports
    report.suspend(|| print_reports(config, &scored))?;
    Ok(())
}

/// Print the most polarized records and the score statistics of a dataset
fn print_reports(config: &Config, scored: &ScoredCorpus<'_>) -> Result<()> {
    let mut stdout = BufWriter::new(std::io::stdout().lock());
    writeln!(stdout, "Dataset {}", scored.corpus().name())?;
    summary::write_records(
        &mut stdout,
        "Most negative tweets:",
        &summary::most_negative(scored, config.report_records),
    )?;
    summary::write_records(
        &mut stdout,
        "Most positive tweets:",
        &summary::most_positive(scored, config.report_records),
    )?;
    write!(stdout, "{}", SentimentSummary::new(scored))?;
    stdout.flush()?;
    Ok(())
}

/// Plot the time series of all datasets against each other
fn plot_comparisons(config: &Config, all_series: &[DatasetSeries], plotter: &Plotter) -> Result<()> {
    if let Some(empty) = all_series.iter().find(|series| series.is_empty()) {
        log::warn!("Not comparing datasets since {} has no shard", empty.name());
        return Ok(());
    }
    let [lhs, rhs, ..] = all_series else {
        log::warn!("Not comparing datasets since there are less than two of them");
        return Ok(());
    };
    let palette = &config.comparison_palette[..];
    plotter.plot_comparison("comparison.svg", all_series, palette)?;
    plotter.plot_difference("comparison_difference.svg", lhs, rhs, palette)?;
    Ok(())
}

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
