//! Parallel search of a single node-count level.
//!
//! The lazy candidate stream is bridged into a rayon pool. Each worker
//! builds, evaluates and tests its candidates independently; the only
//! shared state is a handful of atomic counters and the result sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use primeseek_build::{AssembledExpression, AssemblyError, ExpressionBuilder};
use primeseek_core::SearchConfig;
use primeseek_eval::{EvaluationEngine, ValueSet};
use primeseek_space::{CandidateDescriptor, CombinationSpace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::detector::MatchDetector;
use crate::error::SearchResult;
use crate::progress::ProgressReporter;
use crate::sink::{ResultSink, SinkError};

/// Execution knobs that do not affect which candidates match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Worker threads; `0` lets rayon decide.
    pub threads: usize,
    /// Refuse levels with more candidates than this.
    pub candidate_limit: Option<u128>,
    /// Candidates between progress notifications.
    pub progress_interval: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            candidate_limit: None,
            progress_interval: 10_000,
        }
    }
}

/// Outcome of one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelReport {
    /// Nodes per candidate.
    pub node_count: usize,
    /// Size of the level's space.
    pub total: u128,
    /// Candidates built and evaluated.
    pub evaluated: u64,
    /// Candidates that could not be built.
    pub skipped: u64,
    /// Candidates written to the sink.
    pub matches: u64,
    /// The level stopped early on request.
    pub cancelled: bool,
}

impl LevelReport {
    /// Candidates handled in any way.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.evaluated + self.skipped
    }
}

/// A single candidate run through build, evaluate and match.
#[derive(Clone, Debug)]
pub struct Verdict {
    /// The assembled candidate.
    pub expression: AssembledExpression,
    /// Its distinct outcomes.
    pub values: ValueSet,
    /// Whether the outcomes cover the targets.
    pub is_match: bool,
}

#[derive(Default)]
struct Counters {
    processed: AtomicU64,
    evaluated: AtomicU64,
    skipped: AtomicU64,
    matches: AtomicU64,
}

/// Stops `try_for_each` early.
struct Halt;

/// Runs whole levels on a dedicated worker pool.
pub struct LevelRunner {
    config: SearchConfig,
    options: RunOptions,
    builder: ExpressionBuilder,
    engine: EvaluationEngine,
    detector: MatchDetector,
    pool: ThreadPool,
}

impl LevelRunner {
    /// Validates `config` and starts the worker pool.
    ///
    /// # Errors
    ///
    /// [`SearchError::Config`](crate::SearchError::Config) for invalid
    /// parameters, [`SearchError::ThreadPool`](crate::SearchError::ThreadPool)
    /// if the pool cannot be created.
    pub fn new(config: SearchConfig, options: RunOptions) -> SearchResult<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .thread_name(|i| format!("primeseek-worker-{i}"))
            .build()?;

        Ok(Self {
            engine: EvaluationEngine::new(&config),
            detector: MatchDetector::from_config(&config),
            builder: ExpressionBuilder::new(),
            config,
            options,
            pool,
        })
    }

    /// The search parameters.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Builds, evaluates and tests one candidate.
    ///
    /// # Errors
    ///
    /// Returns the [`AssemblyError`] if the candidate cannot be built.
    pub fn check(&self, candidate: &CandidateDescriptor) -> Result<Verdict, AssemblyError> {
        let expression = self.builder.build(candidate)?;
        let values = self.engine.evaluate(&expression);
        let is_match = self.detector.is_match(&values);
        Ok(Verdict {
            expression,
            values,
            is_match,
        })
    }

    /// Searches every candidate with `node_count` nodes.
    ///
    /// # Errors
    ///
    /// See [`run_level_from`](Self::run_level_from).
    pub fn run_level(
        &self,
        node_count: usize,
        sink: &dyn ResultSink,
        progress: &dyn ProgressReporter,
        cancel: &CancelToken,
    ) -> SearchResult<LevelReport> {
        self.run_level_from(node_count, 0, sink, progress, cancel)
    }

    /// Searches the candidates with `node_count` nodes from ordinal `start`
    /// onwards.
    ///
    /// Cancellation is observed between candidates and yields a report with
    /// `cancelled` set rather than an error.
    ///
    /// # Errors
    ///
    /// [`SearchError::Space`](crate::SearchError::Space) if the level is too
    /// large or `start` is past its end,
    /// [`SearchError::Sink`](crate::SearchError::Sink) if a match could not
    /// be stored.
    pub fn run_level_from(
        &self,
        node_count: usize,
        start: u128,
        sink: &dyn ResultSink,
        progress: &dyn ProgressReporter,
        cancel: &CancelToken,
    ) -> SearchResult<LevelReport> {
        let space = CombinationSpace::with_shape(node_count, self.config.nesting_level);
        let total = space.ensure_within(self.options.candidate_limit)?;
        let stream = space.candidates_from(start)?;

        debug!(
            node_count,
            nesting_level = self.config.nesting_level,
            total = %total,
            start = %start,
            threads = self.threads(),
            "starting level"
        );
        progress.level_started(node_count, total);

        let counters = Counters::default();
        let failure: Mutex<Option<SinkError>> = Mutex::new(None);
        let offset = u64::try_from(start).unwrap_or(u64::MAX);
        let interval = self.options.progress_interval.max(1);

        let outcome = self.pool.install(|| {
            stream.par_bridge().try_for_each(|(ordinal, candidate)| {
                if cancel.is_cancelled() {
                    return Err(Halt);
                }
                if let Err(err) = self.process(ordinal, &candidate, sink, &counters) {
                    if let Ok(mut slot) = failure.lock() {
                        slot.get_or_insert(err);
                    }
                    cancel.cancel();
                    return Err(Halt);
                }
                let done = counters.processed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % interval == 0 {
                    progress.report(offset.saturating_add(done), total, node_count);
                }
                Ok(())
            })
        });

        if let Some(err) = failure.into_inner().ok().flatten() {
            return Err(err.into());
        }

        let report = LevelReport {
            node_count,
            total,
            evaluated: counters.evaluated.into_inner(),
            skipped: counters.skipped.into_inner(),
            matches: counters.matches.into_inner(),
            cancelled: outcome.is_err(),
        };
        progress.report(
            offset.saturating_add(report.processed()),
            total,
            node_count,
        );
        progress.level_finished(&report);
        debug!(?report, "level finished");

        Ok(report)
    }

    fn process(
        &self,
        ordinal: u128,
        candidate: &CandidateDescriptor,
        sink: &dyn ResultSink,
        counters: &Counters,
    ) -> Result<(), SinkError> {
        let verdict = match self.check(candidate) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(ordinal = %ordinal, error = %err, "skipping unbuildable candidate");
                counters.skipped.fetch_add(1, Ordering::Relaxed);
                return Ok(());
            }
        };
        counters.evaluated.fetch_add(1, Ordering::Relaxed);

        if verdict.is_match {
            info!(
                ordinal = %ordinal,
                expression = verdict.expression.text(),
                values = %verdict.values,
                "found an expression covering the targets"
            );
            sink.record(verdict.expression.text(), &verdict.values)?;
            counters.matches.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

impl std::fmt::Debug for LevelRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelRunner")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("threads", &self.threads())
            .finish_non_exhaustive()
    }
}
