//! # primeseek
//!
//! Searches a combinatorial space of small arithmetic expressions in an
//! index variable `n` for those whose values over `n = 0..=20` include the
//! first ten primes.
//!
//! ## Pipeline
//!
//! - [`space`]: lazy enumeration of candidate descriptors
//! - [`build`]: assembly of descriptors into balanced expressions
//! - [`eval`]: sampling across the index range into value sets
//! - [`search`]: match detection, parallel levels and escalation
//!
//! ## Quick Start
//!
//! ```
//! use primeseek::prelude::*;
//!
//! let config = SearchConfig { node_count: 1, ..SearchConfig::default() };
//! let runner = LevelRunner::new(config, RunOptions::default()).unwrap();
//! let sink = MemorySink::new();
//! let report = runner
//!     .run_level(1, &sink, &NoProgress, &CancelToken::new())
//!     .unwrap();
//! assert_eq!(report.total, 26);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use primeseek_build as build;
pub use primeseek_core as core;
pub use primeseek_eval as eval;
pub use primeseek_search as search;
pub use primeseek_space as space;

pub mod settings;
pub mod terminal;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use primeseek_build::{AssembledExpression, AssemblyError, ExpressionBuilder};
    pub use primeseek_core::{Operator, SearchConfig, Term, TermVocabulary, WrapTemplate};
    pub use primeseek_eval::{EvaluationEngine, Outcome, ValueSet};
    pub use primeseek_search::{
        CancelToken, EscalationPrompt, FileSink, LevelReport, LevelRunner, MatchDetector,
        MemorySink, NoProgress, Orchestrator, ProgressReporter, ResultSink, RunOptions,
        RunSummary, SearchError, StopReason,
    };
    pub use primeseek_space::{CandidateDescriptor, CombinationSpace, PositionPair, SpaceError};
}
