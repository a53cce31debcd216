//! Immutable per-run search parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocabulary::TARGET_PRIMES;

/// Rejected search parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("node_count must be at least 1")]
    NoNodes,

    #[error("nesting_level must be at least 1")]
    NoNesting,

    #[error("precision_tolerance must lie in [0, 0.5), got {0}")]
    Tolerance(f64),

    #[error("target set must not be empty")]
    EmptyTarget,
}

/// Parameters shared by every component of one search run.
///
/// Built once at process start and passed by reference everywhere; there is
/// no global configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of terms per candidate.
    pub node_count: usize,
    /// Wrap slots per node; `node_count * nesting_level` wraps per candidate.
    pub nesting_level: usize,
    /// Largest index value sampled; samples run over `0..=iteration_limit`.
    pub iteration_limit: u32,
    /// Values within this distance of an integer are snapped to it.
    pub precision_tolerance: f64,
    /// The set whose proper superset counts as a match.
    pub target_primes: Vec<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_count: 3,
            nesting_level: 1,
            iteration_limit: 20,
            precision_tolerance: 0.0001,
            target_primes: TARGET_PRIMES.to_vec(),
        }
    }
}

impl SearchConfig {
    /// Creates a validated configuration with the default target set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter is out of range.
    pub fn new(
        node_count: usize,
        nesting_level: usize,
        iteration_limit: u32,
        precision_tolerance: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            node_count,
            nesting_level,
            iteration_limit,
            precision_tolerance,
            target_primes: TARGET_PRIMES.to_vec(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 {
            return Err(ConfigError::NoNodes);
        }
        if self.nesting_level == 0 {
            return Err(ConfigError::NoNesting);
        }
        if !(0.0..0.5).contains(&self.precision_tolerance) {
            return Err(ConfigError::Tolerance(self.precision_tolerance));
        }
        if self.target_primes.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        Ok(())
    }

    /// Number of samples taken per candidate.
    #[must_use]
    pub fn sample_count(&self) -> u64 {
        u64::from(self.iteration_limit) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.node_count, 3);
        assert_eq!(config.nesting_level, 1);
        assert_eq!(config.sample_count(), 21);
        assert_eq!(config.target_primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(SearchConfig::new(0, 1, 20, 1e-4), Err(ConfigError::NoNodes));
        assert_eq!(SearchConfig::new(3, 0, 20, 1e-4), Err(ConfigError::NoNesting));
        assert!(matches!(
            SearchConfig::new(3, 1, 20, 0.5),
            Err(ConfigError::Tolerance(_))
        ));
        assert!(matches!(
            SearchConfig::new(3, 1, 20, f64::NAN),
            Err(ConfigError::Tolerance(_))
        ));
    }

}
