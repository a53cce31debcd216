//! Node ranges a wrap template can be attached to.

use std::fmt;

/// Where a wrap's prefix and suffix land.
///
/// `left` names the node whose left side receives the prefix, `right` the
/// node whose right side receives the suffix. A pair with neither side set
/// leaves the candidate untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionPair {
    /// Node receiving the prefix.
    pub left: Option<usize>,
    /// Node receiving the suffix.
    pub right: Option<usize>,
}

impl PositionPair {
    /// The no-op pair.
    pub const ABSENT: PositionPair = PositionPair {
        left: None,
        right: None,
    };

    /// A pair enclosing nodes `left..=right`.
    #[must_use]
    pub const fn span(left: usize, right: usize) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    /// Returns true for the no-op pair.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for PositionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.left, self.right) {
            (Some(l), Some(r)) => write!(f, "[{l},{r}]"),
            (Some(l), None) => write!(f, "[{l},-]"),
            (None, Some(r)) => write!(f, "[-,{r}]"),
            (None, None) => f.write_str("[-,-]"),
        }
    }
}

/// All pairs `(i, j)` with `i <= j < node_count`, in repeated-combination
/// order, followed by the absent pair.
///
/// For three nodes that is `[0,0] [0,1] [0,2] [1,1] [1,2] [2,2] [-,-]`,
/// i.e. `(A)*B+C`, `(A*B)+C`, `(A*B+C)`, `A*(B)+C`, `A*(B+C)`, `A*B+(C)`
/// and no wrap at all.
#[must_use]
pub fn position_pairs(node_count: usize) -> Vec<PositionPair> {
    let mut pairs = Vec::with_capacity(position_pair_count(node_count));
    for left in 0..node_count {
        for right in left..node_count {
            pairs.push(PositionPair::span(left, right));
        }
    }
    pairs.push(PositionPair::ABSENT);
    pairs
}

/// `node_count * (node_count + 1) / 2 + 1`
#[must_use]
pub const fn position_pair_count(node_count: usize) -> usize {
    node_count * (node_count + 1) / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_node_pairs() {
        let pairs = position_pairs(3);
        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[0], PositionPair::span(0, 0));
        assert_eq!(pairs[2], PositionPair::span(0, 2));
        assert_eq!(pairs[5], PositionPair::span(2, 2));
        assert!(pairs[6].is_absent());
    }

    #[test]
    fn test_pair_count_matches() {
        for nodes in 1..8 {
            assert_eq!(position_pairs(nodes).len(), position_pair_count(nodes));
        }
    }

    #[test]
    fn test_every_span_is_ordered() {
        for pair in position_pairs(5) {
            if let (Some(l), Some(r)) = (pair.left, pair.right) {
                assert!(l <= r);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(PositionPair::span(1, 2).to_string(), "[1,2]");
        assert_eq!(PositionPair::ABSENT.to_string(), "[-,-]");
    }
}
