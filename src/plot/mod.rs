//! Rendering of finished aggregates as SVG plots
//!
//! Nothing in here computes anything beyond what is needed for display.

pub mod color;

use crate::{
    series::{day, DatasetSeries},
    top::RankedToken,
    Result,
};
use anyhow::Context;
use color::{Color, Gradient};
use plotters::{
    prelude::*,
    style::{Color as _, FontTransform},
};
use std::path::{Path, PathBuf};

/// Size of every plot, in pixels
const PLOT_SIZE: (u32, u32) = (1024, 768);

/// Font family of all plot text
const FONT: &str = "sans-serif";

/// Maximal number of date labels on time series plots
const MAX_DATE_LABELS: usize = 8;

/// Title of the frequency distribution plot of a dataset file
pub fn frequency_title(dataset: &Path) -> String {
    let name = dataset
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    format!("Frequency distribution of words in {name}")
}

/// Uppercase the first character of a title and lowercase the rest
pub fn capitalize(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Writer of plots into an output directory
#[derive(Clone, Debug)]
pub struct Plotter {
    /// Where plot files go
    output_dir: PathBuf,
}
//
impl Plotter {
    /// Prepare to write plots in a directory, creating it if needed
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("creating plot directory {}", output_dir.display()))?;
        Ok(Self {
            output_dir: output_dir.to_owned(),
        })
    }

    /// Bar chart of the most frequent tokens
    ///
    /// Bar colors are picked from a gradient of `amount` colors, `amount`
    /// being the number of tokens that were initially requested.
    pub fn plot_frequencies(
        &self,
        file_name: &str,
        ranked: &[RankedToken<'_>],
        amount: usize,
        gradient: &Gradient,
        title: &str,
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let colors = gradient.colors(amount.max(ranked.len()));
        let title = capitalize(title);
        let num_bars = ranked.len().max(1) as i32;
        let max_count = ranked.iter().map(|&(_token, count)| count).max().unwrap_or(0);
        {
            let root = SVGBackend::new(&path, PLOT_SIZE).into_drawing_area();
            root.fill(&WHITE)?;
            let mut chart = ChartBuilder::on(&root)
                .caption(&title, (FONT, 28))
                .margin(15)
                .x_label_area_size(110)
                .y_label_area_size(60)
                .build_cartesian_2d((0..num_bars).into_segmented(), 0usize..max_count + 1)?;

            let label = |value: &SegmentValue<i32>| match value {
                SegmentValue::CenterOf(idx) => usize::try_from(*idx)
                    .ok()
                    .and_then(|idx| ranked.get(idx))
                    .map_or_else(String::new, |(token, _count)| token.to_string()),
                _ => String::new(),
            };
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(ranked.len().max(1))
                .x_label_formatter(&label)
                .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
                .y_desc("Frequency")
                .draw()?;

            chart.draw_series(ranked.iter().zip(&colors).enumerate().map(
                |(idx, (&(_token, count), color))| {
                    let idx = idx as i32;
                    Rectangle::new(
                        [(SegmentValue::Exact(idx), 0), (SegmentValue::Exact(idx + 1), count)],
                        color.to_rgb().filled(),
                    )
                },
            ))?;
            root.present()?;
        }
        log::info!("Wrote frequency plot {}", path.display());
        Ok(path)
    }

    /// Mean sentiment score of several series over time
    ///
    /// Dates are taken from the first series.
    pub fn plot_comparison(
        &self,
        file_name: &str,
        series: &[DatasetSeries],
        palette: &[Color],
    ) -> Result<PathBuf> {
        let reference = series.first().context("no series to compare")?;
        let (start, end) = reference
            .date_range()
            .with_context(|| format!("series {} has no point", reference.name()))?;
        let title = format!("Mean sentiment score between {start} and {end}");
        let lines = (series.iter())
            .zip(palette.iter().cycle())
            .map(|(series, color)| Line {
                label: Some(series.name()),
                values: series.points().iter().map(|point| point.mean_score).collect(),
                color: color.to_rgb(),
            })
            .collect::<Vec<_>>();
        self.plot_lines(file_name, &title, reference, &lines)
    }

    /// Difference between the mean sentiment scores of two series over time,
    /// against a zero reference line
    pub fn plot_difference(
        &self,
        file_name: &str,
        lhs: &DatasetSeries,
        rhs: &DatasetSeries,
        palette: &[Color],
    ) -> Result<PathBuf> {
        let difference = lhs.difference(rhs);
        let (start, end) = lhs
            .date_range()
            .with_context(|| format!("series {} has no point", lhs.name()))?;
        let title = format!("Difference of mean sentiment scores between {start} and {end}");
        let color = palette.first().context("empty comparison palette")?;
        let lines = [
            Line {
                label: None,
                values: vec![0.0; difference.len()],
                color: BLACK,
            },
            Line {
                label: None,
                values: difference.points().iter().map(|point| point.mean_score).collect(),
                color: color.to_rgb(),
            },
        ];
        self.plot_lines(file_name, &title, &difference, &lines)
    }

    /// Draw lines indexed by the points of a dated series
    fn plot_lines(
        &self,
        file_name: &str,
        title: &str,
        dates: &DatasetSeries,
        lines: &[Line<'_>],
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let len = lines.iter().map(|line| line.values.len()).max().unwrap_or(0);
        let (min, max) = value_range(lines);
        {
            let root = SVGBackend::new(&path, PLOT_SIZE).into_drawing_area();
            root.fill(&WHITE)?;
            let mut chart = ChartBuilder::on(&root)
                .caption(title, (FONT, 24))
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(0..(len.max(2) - 1) as i32, min..max)?;

            let date_label = |idx: &i32| {
                usize::try_from(*idx)
                    .ok()
                    .and_then(|idx| dates.points().get(idx))
                    .map_or_else(String::new, |point| day(&point.date).to_owned())
            };
            chart
                .configure_mesh()
                .x_labels(len.clamp(1, MAX_DATE_LABELS))
                .x_label_formatter(&date_label)
                .y_desc("Mean sentiment score")
                .draw()?;

            let mut has_legend = false;
            for line in lines {
                let color = line.color;
                let points = line.values.iter().enumerate().map(|(idx, &value)| (idx as i32, value));
                let series = chart.draw_series(LineSeries::new(points, &color))?;
                if let Some(label) = line.label {
                    series
                        .label(label)
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
                    has_legend = true;
                }
            }
            if has_legend {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperLeft)
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
            root.present()?;
        }
        log::info!("Wrote time series plot {}", path.display());
        Ok(path)
    }
}

/// Line of a time series plot
struct Line<'label> {
    /// Legend label, if any
    label: Option<&'label str>,

    /// One value per point of the series
    values: Vec<f64>,

    /// Line color
    color: RGBColor,
}

/// Vertical axis range that fits all values of a set of lines, with margins
fn value_range(lines: &[Line<'_>]) -> (f64, f64) {
    let values = || lines.iter().flat_map(|line| line.values.iter().copied());
    let min = values().fold(f64::INFINITY, f64::min);
    let max = values().fold(f64::NEG_INFINITY, f64::max);
    if min > max {
        return (-1.0, 1.0);
    }
    let margin = ((max - min) * 0.05).max(0.05);
    (min - margin, max + margin)
}
