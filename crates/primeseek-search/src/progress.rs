//! Progress reporting hooks.

use crate::runner::LevelReport;

/// Observes a running search.
///
/// Called from worker threads; implementations must be cheap and
/// thread-safe.
pub trait ProgressReporter: Send + Sync {
    /// A level of `total` candidates with `node_count` nodes is starting.
    fn level_started(&self, _node_count: usize, _total: u128) {}

    /// `evaluated` of `total` candidates have been processed.
    fn report(&self, evaluated: u64, total: u128, node_count: usize);

    /// A level has ended, completely or not.
    fn level_finished(&self, _report: &LevelReport) {}
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _evaluated: u64, _total: u128, _node_count: usize) {}
}

/// Percentage of `total` that `evaluated` represents, rounded to five
/// decimal places. An empty level counts as complete.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent(evaluated: u64, total: u128) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let raw = evaluated as f64 / total as f64 * 100.0;
    (raw * 1e5).round() / 1e5
}
