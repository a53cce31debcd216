//! # primeseek-search
//!
//! Runs the search: every candidate of a level is built, evaluated and
//! tested against the target primes on a rayon pool, matches are handed to
//! a [`ResultSink`], and an [`Orchestrator`] escalates the node count level
//! by level.
//!
//! The outside world is reached only through traits:
//! - [`ResultSink`] stores matches
//! - [`ProgressReporter`] observes progress
//! - [`EscalationPrompt`] decides whether to go on to the next level

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cancel;
pub mod detector;
pub mod error;
pub mod orchestrator;
pub mod progress;
pub mod prompt;
pub mod runner;
pub mod sink;

pub use cancel::CancelToken;
pub use detector::MatchDetector;
pub use error::{SearchError, SearchResult};
pub use orchestrator::{Orchestrator, RunSummary, StopReason};
pub use progress::{percent, NoProgress, ProgressReporter};
pub use prompt::{EscalationPrompt, FixedAnswer, LinePrompt};
pub use runner::{LevelReport, LevelRunner, RunOptions, Verdict};
pub use sink::{FileSink, MatchRecord, MemorySink, ResultSink, SinkError, DEFAULT_SUFFIX};
