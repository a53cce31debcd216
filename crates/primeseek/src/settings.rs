//! Application configuration, layered from defaults, an optional TOML file
//! and `PRIMESEEK_*` environment variables.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `PRIMESEEK_SEARCH__NODE_COUNT=4` or `PRIMESEEK_RUN__THREADS=8`.

use std::path::{Path, PathBuf};

use primeseek_core::SearchConfig;
use primeseek_search::{RunOptions, DEFAULT_SUFFIX};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration could not be assembled.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] primeseek_core::ConfigError),
}

/// Everything the binary needs to start a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search parameters
    #[serde(default)]
    pub search: SearchConfig,

    /// Execution settings
    #[serde(default)]
    pub run: RunConfig,
}

/// How a run is executed and where its output goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Worker threads, 0 for one per core
    #[serde(default)]
    pub threads: usize,

    /// Directory receiving the result file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Result file name after the timestamp
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Last node count to search
    #[serde(default)]
    pub max_node_count: Option<usize>,

    /// Largest level worth searching
    #[serde(default)]
    pub candidate_limit: Option<u64>,

    /// Candidates between progress updates
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,

    /// Continue to the next level without asking
    #[serde(default)]
    pub assume_yes: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            output_dir: default_output_dir(),
            output_suffix: default_output_suffix(),
            max_node_count: None,
            candidate_limit: None,
            progress_interval: default_progress_interval(),
            assume_yes: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_progress_interval() -> u64 {
    10_000
}

impl AppConfig {
    /// Loads configuration, reading `path` if given.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or malformed, or a value does not
    /// deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PRIMESEEK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Checks the search parameters.
    ///
    /// # Errors
    ///
    /// The first invalid search parameter.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.search.validate()?;
        Ok(())
    }

    /// Execution options for the level runner.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            threads: self.run.threads,
            candidate_limit: self.run.candidate_limit.map(u128::from),
            progress_interval: self.run.progress_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.search.node_count, 3);
        assert_eq!(config.search.nesting_level, 1);
        assert_eq!(config.search.iteration_limit, 20);
        assert_eq!(config.run.output_suffix, "primeseek_output.txt");
        assert!(!config.run.assume_yes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[search]\nnode_count = 2\nprecision_tolerance = 0.001\n\n\
             [run]\nthreads = 4\ncandidate_limit = 1000000\nassume_yes = true"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.search.node_count, 2);
        assert_eq!(config.search.precision_tolerance, 0.001);
        assert_eq!(config.search.iteration_limit, 20);
        assert_eq!(config.run.threads, 4);
        assert!(config.run.assume_yes);
        assert_eq!(config.run_options().candidate_limit, Some(1_000_000));
        assert_eq!(config.run.output_suffix, "primeseek_output.txt");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(SettingsError::Load(_))
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.search.precision_tolerance = 0.7;
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));
    }
}
