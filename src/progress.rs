//! Progress reporting infrastructure

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::{borrow::Cow, cell::Cell};

/// CLI progress report of ongoing operations
///
/// To avoid corrupted terminal output, you should not write anything to stdout
/// or stderr yourself while a progress bar is being displayed. Use logs for
/// debug messages, and [`ProgressReport::suspend()`] for reports.
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress report that is never displayed
    pub fn hidden() -> Self {
        Self(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    /// Prepare to report on a new operation
    pub fn add(&self, what: impl Into<Cow<'static, str>>, config: ProgressConfig) -> ProgressTracker {
        let what = what.into();
        let ProgressConfig {
            work,
            show_rate_eta,
        } = config;
        let mut bar = ProgressBar::new(work.into()).with_prefix(what);
        let style_header = "{prefix} {wide_bar} ";
        let style_trailer = match (work, show_rate_eta) {
            (Work::Steps(_), false) => "{pos}/{len}",
            (Work::Steps(_), true) => "{pos}/{len} ({per_sec})",
            (Work::PercentSteps(_), false) => "{percent:>2}%",
            (Work::PercentSteps(_), true) => "{percent:>2}% (~{eta} left)",
            (Work::Bytes(_), false) => "{decimal_bytes}/{decimal_total_bytes}",
            (Work::Bytes(_), true) => {
                "{decimal_bytes}/{decimal_total_bytes} ({decimal_bytes_per_sec})"
            }
        };
        bar = bar.with_style(
            ProgressStyle::with_template(&format!("{style_header}{style_trailer}"))
                .expect("all styles above should be valid indicatif styles"),
        );
        let shown = u64::from(work) > 0;
        if shown {
            bar = self.0.add(bar);
        }
        ProgressTracker {
            bar,
            report: self.0.clone(),
            shown: Cell::new(shown),
        }
    }

    /// Hide the progress bars while some text is written to the terminal
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.0.suspend(f)
    }
}

/// Progress bar configuration
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProgressConfig {
    /// Length of the progress bar
    work: Work,

    /// Show the completion rate or estimated remaining time, depending on work
    show_rate_eta: bool,
}
//
impl ProgressConfig {
    /// Default configuration, with some amount of work
    pub fn new(work: Work) -> Self {
        Self {
            work,
            show_rate_eta: true,
        }
    }

    /// Disable tracking of step completions
    pub fn dont_show_rate_eta(self) -> Self {
        Self {
            show_rate_eta: false,
            ..self
        }
    }
}

/// Work whose progression that can be tracked
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Work {
    /// Steps to be taken, with a precise count display
    Steps(usize),

    /// Steps to be taken, with a percentage-based display
    PercentSteps(usize),

    /// Bytes to be processed
    Bytes(u64),
}
//
impl From<Work> for u64 {
    fn from(value: Work) -> Self {
        match value {
            Work::Steps(s) => s as u64,
            Work::PercentSteps(p) => p as u64,
            Work::Bytes(b) => b,
        }
    }
}

/// Mechanism to track progress
#[derive(Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific operation
    bar: ProgressBar,

    /// Underlying process report
    report: MultiProgress,

    /// Truth that the progress bar is currently part of the report
    shown: Cell<bool>,
}
//
impl ProgressTracker {
    /// Show that a certain amount of progress has been made
    ///
    /// Returns truth that the progress bar has reached its maximum value
    pub fn make_progress(&self, progress: u64) -> bool {
        // Track progress
        self.bar.inc(progress);
        let current = self.bar.position();
        let max = self.bar.length().unwrap_or(0);
        debug_assert!(current <= max, "recorded more progress than expected");

        // Hide progress bar once done
        let finished = current >= max;
        if finished {
            self.finish();
        }
        finished
    }

    /// Remove the progress bar from the report, done or not
    pub fn finish(&self) {
        if self.shown.replace(false) {
            self.bar.finish_and_clear();
            self.report.remove(&self.bar);
        }
    }
}
//
impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}
