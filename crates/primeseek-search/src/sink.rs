//! Append-only storage for matches.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use primeseek_eval::ValueSet;
use thiserror::Error;

/// Default suffix of the result file name.
pub const DEFAULT_SUFFIX: &str = "primeseek_output.txt";

/// A match could not be stored.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write match record: {0}")]
    Write(#[from] io::Error),

    #[error("result sink lock poisoned")]
    Poisoned,
}

/// Receives matching expressions from concurrent workers.
///
/// Implementations serialize records so that two matches never interleave.
pub trait ResultSink: Send + Sync {
    /// Stores one match.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the record could not be stored; the run
    /// treats this as fatal.
    fn record(&self, expression: &str, values: &ValueSet) -> Result<(), SinkError>;
}

/// Formats one record: the expression, its distinct values, a blank line.
#[must_use]
pub fn format_record(expression: &str, values: &ValueSet) -> String {
    format!("{expression}\n{values}\n\n")
}

/// Builds `<unix-seconds>_<suffix>`.
#[must_use]
pub fn timestamped_name(unix_seconds: i64, suffix: &str) -> String {
    format!("{unix_seconds}_{suffix}")
}

/// Appends records to a file, flushing after each one.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Opens `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// [`SinkError::Open`] if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Opens `<dir>/<unix-seconds>_<suffix>` using the current time.
    ///
    /// # Errors
    ///
    /// [`SinkError::Open`] if the file cannot be opened.
    pub fn timestamped(dir: &Path, suffix: &str) -> Result<Self, SinkError> {
        let name = timestamped_name(chrono::Utc::now().timestamp(), suffix);
        Self::open(dir.join(name))
    }

    /// Where records are written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileSink {
    fn record(&self, expression: &str, values: &ValueSet) -> Result<(), SinkError> {
        let record = format_record(expression, values);
        let mut file = self.file.lock().map_err(|_| SinkError::Poisoned)?;
        file.write_all(record.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// A stored match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    /// Expression text.
    pub expression: String,
    /// Its distinct outcomes.
    pub values: ValueSet,
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<MatchRecord>>,
}

impl MemorySink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far, in arrival order.
    #[must_use]
    pub fn records(&self) -> Vec<MatchRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ResultSink for MemorySink {
    fn record(&self, expression: &str, values: &ValueSet) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(MatchRecord {
                expression: expression.to_string(),
                values: values.clone(),
            });
        Ok(())
    }
}
