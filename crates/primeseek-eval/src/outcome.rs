//! Sample outcomes and the deduplicating set they are collected into.

use std::cmp::Ordering;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A finite `f64` other than `-0.0`.
///
/// Only [`Outcome::value`] creates one, so every numeric outcome is
/// comparable with plain bit equality.
#[derive(Clone, Copy, Debug)]
pub struct Finite(f64);

impl Finite {
    /// The wrapped value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// The result of evaluating a candidate at one index value.
#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    /// A finite real value.
    Value(Finite),
    /// The sample failed; the reason is deliberately not kept.
    Error,
}

impl Outcome {
    /// Wraps a value, mapping non-finite input to [`Outcome::Error`] and
    /// `-0.0` to `0.0`.
    #[must_use]
    pub fn value(value: f64) -> Self {
        if !value.is_finite() {
            Outcome::Error
        } else if value == 0.0 {
            Outcome::Value(Finite(0.0))
        } else {
            Outcome::Value(Finite(value))
        }
    }

    /// The numeric value, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Outcome::Value(v) => Some(v.get()),
            Outcome::Error => None,
        }
    }

    /// Returns true for the error marker.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error)
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Outcome {}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Values ascend; the error marker sorts last.
impl Ord for Outcome {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Outcome::Value(a), Outcome::Value(b)) => a.0.total_cmp(&b.0),
            (Outcome::Value(_), Outcome::Error) => Ordering::Less,
            (Outcome::Error, Outcome::Value(_)) => Ordering::Greater,
            (Outcome::Error, Outcome::Error) => Ordering::Equal,
        }
    }
}

impl Hash for Outcome {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Outcome::Value(v) => {
                0u8.hash(state);
                v.0.to_bits().hash(state);
            }
            Outcome::Error => 1u8.hash(state),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{:?}", v.0),
            Outcome::Error => f.write_str("error"),
        }
    }
}

/// Snaps `value` to the nearest integer when it lies within `tolerance`.
///
/// `normalize(6.99995, 1e-4) == 7.0`, `normalize(6.998, 1e-4) == 6.998`.
#[must_use]
pub fn normalize(value: f64, tolerance: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= tolerance {
        nearest
    } else {
        value
    }
}

/// The distinct outcomes of one candidate across all samples.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueSet {
    outcomes: BTreeSet<Outcome>,
}

impl ValueSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an outcome; duplicates collapse.
    pub fn insert(&mut self, outcome: Outcome) -> bool {
        self.outcomes.insert(outcome)
    }

    /// Returns true if `outcome` is present.
    #[must_use]
    pub fn contains(&self, outcome: &Outcome) -> bool {
        self.outcomes.contains(outcome)
    }

    /// Returns true if the exact value `value` is present.
    #[must_use]
    pub fn contains_value(&self, value: f64) -> bool {
        self.contains(&Outcome::value(value))
    }

    /// Returns true if some sample failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.contains(&Outcome::Error)
    }

    /// Number of distinct outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if no outcome has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes in ascending order, error marker last.
    pub fn iter(&self) -> btree_set::Iter<'_, Outcome> {
        self.outcomes.iter()
    }
}

impl FromIterator<Outcome> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Outcome> for ValueSet {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Outcome;
    type IntoIter = btree_set::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders as `[2.0, 3.0, error]`.
impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{outcome}")?;
        }
        f.write_str("]")
    }
}
