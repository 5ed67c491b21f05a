//! Per-group progress callbacks.

use tracing::info;

/// Receives a synchronous update after each group is processed.
pub trait ProgressReporter {
    /// `n_current` is 1-based; `n_total` is the number of distinct groups.
    fn on_progress(&mut self, n_current: usize, n_total: usize, label: &str);
}

/// Whole percent done, rounded down; `0` when there is nothing to do.
pub fn percent_of(n_current: usize, n_total: usize) -> usize {
    if n_total == 0 {
        return 0;
    }
    n_current.saturating_mul(100) / n_total
}

/// Status line shown for one progress update.
pub fn format_progress(n_current: usize, n_total: usize, label: &str) -> String {
    format!(
        "Processing: {label}. Progress: {}% ({n_current} of {n_total})",
        percent_of(n_current, n_total)
    )
}

/// Emits one `info!` status line per update.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressReporter;

impl ProgressReporter for LogProgressReporter {
    fn on_progress(&mut self, n_current: usize, n_total: usize, label: &str) {
        info!("{}", format_progress(n_current, n_total, label));
    }
}

/// Ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn on_progress(&mut self, _n_current: usize, _n_total: usize, _label: &str) {}
}
