//! Node-count escalation across levels.

use primeseek_space::SpaceError;
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::error::{SearchError, SearchResult};
use crate::progress::ProgressReporter;
use crate::prompt::EscalationPrompt;
use crate::runner::{LevelReport, LevelRunner};
use crate::sink::ResultSink;

/// Why a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The operator chose not to continue.
    Declined,
    /// The cancel token was tripped.
    Cancelled,
    /// The configured maximum node count was reached.
    MaxNodeCount,
    /// The next level was too large to search.
    Overflow(SpaceError),
}

/// Every level searched, and why the run stopped.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Reports in the order the levels ran.
    pub levels: Vec<LevelReport>,
    /// What ended the run.
    pub stop: StopReason,
}

impl RunSummary {
    /// Matches across all levels.
    #[must_use]
    pub fn total_matches(&self) -> u64 {
        self.levels.iter().map(|level| level.matches).sum()
    }
}

/// Drives levels of increasing node count until told to stop.
#[derive(Debug)]
pub struct Orchestrator {
    runner: LevelRunner,
    max_node_count: Option<usize>,
    resume_from: u128,
}

impl Orchestrator {
    /// Escalates from the runner's configured node count without bound.
    #[must_use]
    pub fn new(runner: LevelRunner) -> Self {
        Self {
            runner,
            max_node_count: None,
            resume_from: 0,
        }
    }

    /// Stops after the level with `max` nodes.
    #[must_use]
    pub fn with_max_node_count(mut self, max: Option<usize>) -> Self {
        self.max_node_count = max;
        self
    }

    /// Starts the first level at candidate ordinal `ordinal`.
    #[must_use]
    pub fn resuming_from(mut self, ordinal: u128) -> Self {
        self.resume_from = ordinal;
        self
    }

    /// The underlying level runner.
    #[must_use]
    pub fn runner(&self) -> &LevelRunner {
        &self.runner
    }

    /// Runs levels until the prompt declines, the maximum is reached, a
    /// level is too large, or `cancel` is tripped.
    ///
    /// An oversized level is reported as [`StopReason::Overflow`], not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Sink or prompt failures, and a resume ordinal past the end of the
    /// first level.
    pub fn run(
        &self,
        sink: &dyn ResultSink,
        progress: &dyn ProgressReporter,
        prompt: &mut dyn EscalationPrompt,
        cancel: &CancelToken,
    ) -> SearchResult<RunSummary> {
        let mut levels = Vec::new();
        let mut node_count = self.runner.config().node_count;
        let mut start = self.resume_from;

        let stop = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self.max_node_count.is_some_and(|max| node_count > max) {
                break StopReason::MaxNodeCount;
            }

            let report = match self
                .runner
                .run_level_from(node_count, start, sink, progress, cancel)
            {
                Ok(report) => report,
                Err(SearchError::Space(err @ SpaceError::GenerationOverflow { .. })) => {
                    warn!(
                        error = %err,
                        "candidate space too large; lower node_count or nesting_level"
                    );
                    break StopReason::Overflow(err);
                }
                Err(err) => return Err(err),
            };
            start = 0;
            levels.push(report);

            info!(
                node_count,
                evaluated = report.evaluated,
                skipped = report.skipped,
                matches = report.matches,
                "level complete"
            );

            if report.cancelled {
                break StopReason::Cancelled;
            }
            if self.max_node_count.is_some_and(|max| node_count >= max) {
                break StopReason::MaxNodeCount;
            }
            if !prompt
                .confirm_next(node_count, node_count + 1)
                .map_err(SearchError::Prompt)?
            {
                break StopReason::Declined;
            }
            node_count += 1;
        };

        Ok(RunSummary { levels, stop })
    }
}
