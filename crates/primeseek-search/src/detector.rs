//! The proper-superset match rule.

use primeseek_core::SearchConfig;
use primeseek_eval::{Outcome, ValueSet};

/// Decides whether a value set covers the target primes.
///
/// A set matches when every target appears in it and it holds at least one
/// further outcome, numeric or the error marker. A set equal to the targets
/// does not match.
#[derive(Clone, Debug)]
pub struct MatchDetector {
    targets: ValueSet,
}

impl MatchDetector {
    /// Creates a detector for an explicit target list.
    #[must_use]
    pub fn new(targets: &[u64]) -> Self {
        Self {
            targets: targets
                .iter()
                .map(|&p| Outcome::value(p as f64))
                .collect(),
        }
    }

    /// Creates a detector for the targets of `config`.
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.target_primes)
    }

    /// The targets as outcomes.
    #[must_use]
    pub fn targets(&self) -> &ValueSet {
        &self.targets
    }

    /// Returns true if the targets are a proper subset of `values`.
    #[must_use]
    pub fn is_match(&self, values: &ValueSet) -> bool {
        values.len() > self.targets.len() && self.targets.iter().all(|t| values.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primeseek_core::TARGET_PRIMES;

    fn primes() -> Vec<Outcome> {
        TARGET_PRIMES
            .iter()
            .map(|&p| Outcome::value(p as f64))
            .collect()
    }

    #[test]
    fn test_exact_target_set_is_not_a_match() {
        let detector = MatchDetector::new(&TARGET_PRIMES);
        let values: ValueSet = primes().into_iter().collect();
        assert!(!detector.is_match(&values));
    }

    #[test]
    fn test_error_marker_completes_a_match() {
        let detector = MatchDetector::new(&TARGET_PRIMES);
        let mut values: ValueSet = primes().into_iter().collect();
        values.insert(Outcome::Error);
        assert!(detector.is_match(&values));
    }

    #[test]
    fn test_extra_value_completes_a_match() {
        let detector = MatchDetector::new(&TARGET_PRIMES);
        let mut values: ValueSet = primes().into_iter().collect();
        values.insert(Outcome::value(1.0));
        assert!(detector.is_match(&values));
    }

    #[test]
    fn test_missing_prime_is_not_a_match() {
        let detector = MatchDetector::new(&TARGET_PRIMES);
        let mut values: ValueSet = primes()
            .into_iter()
            .filter(|o| *o != Outcome::value(29.0))
            .collect();
        values.insert(Outcome::value(31.0));
        values.insert(Outcome::Error);
        assert!(!detector.is_match(&values));
    }

    #[test]
    fn test_non_integer_near_prime_does_not_count() {
        let detector = MatchDetector::new(&[2, 3]);
        let values: ValueSet = [
            Outcome::value(2.0),
            Outcome::value(3.0001),
            Outcome::value(4.0),
        ]
        .into_iter()
        .collect();
        assert!(!detector.is_match(&values));
    }
}
