//! Run-fatal failures.

use std::io;

use primeseek_core::ConfigError;
use primeseek_space::SpaceError;
use thiserror::Error;

use crate::sink::SinkError;

/// Errors that end a search run.
///
/// Per-candidate problems never appear here: evaluation failures become
/// error markers and unbuildable candidates are skipped.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to read escalation answer: {0}")]
    Prompt(#[source] io::Error),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Shorthand for search results.
pub type SearchResult<T> = Result<T, SearchError>;
