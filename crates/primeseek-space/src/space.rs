//! The candidate space for one `(node_count, nesting_level)` shape.
//!
//! The space is the Cartesian product of four independent dimensions:
//!
//! | dimension        | tuple length             | domain               |
//! |------------------|--------------------------|----------------------|
//! | operators        | `node_count - 1`         | operators            |
//! | nodes            | `node_count`             | terms, with `n` ≥ 1× |
//! | wrap templates   | `node_count * nesting`   | wrap templates       |
//! | positions        | `node_count * nesting`   | position pairs       |
//!
//! Candidates are produced lazily by [`CandidateStream`], operators
//! outermost and positions innermost. The product is never materialized.

use std::fmt;

use primeseek_core::{Operator, SearchConfig, Term, TermVocabulary, WrapTemplate};
use thiserror::Error;

use crate::candidate::CandidateDescriptor;
use crate::odometer::{Digits, Odometer, RepeatedPermutations};
use crate::positions::{position_pairs, PositionPair};

/// Why a space was judged too large to search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowReason {
    /// The closed-form count does not fit in 128 bits.
    Unrepresentable,
    /// The count exceeds a configured ceiling.
    AboveLimit {
        /// Exact candidate count.
        total: u128,
        /// Configured ceiling.
        limit: u128,
    },
}

impl fmt::Display for OverflowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowReason::Unrepresentable => f.write_str("count exceeds 2^128"),
            OverflowReason::AboveLimit { total, limit } => {
                write!(f, "{total} candidates exceeds the limit of {limit}")
            }
        }
    }
}

/// Errors raised while sizing or positioning within a space.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpaceError {
    #[error("candidate space for {node_count} nodes at nesting level {nesting_level} is impractically large: {reason}")]
    GenerationOverflow {
        node_count: usize,
        nesting_level: usize,
        reason: OverflowReason,
    },

    #[error("ordinal {ordinal} is past the end of a space of {total} candidates")]
    OrdinalOutOfRange { ordinal: u128, total: u128 },
}

/// Closed-form size of each dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionSizes {
    /// Operator assignments.
    pub operators: u128,
    /// Node assignments containing the index variable.
    pub nodes: u128,
    /// Wrap-template assignments.
    pub wrap_templates: u128,
    /// Position assignments.
    pub positions: u128,
}

impl DimensionSizes {
    /// Product of all four sizes, or `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<u128> {
        self.operators
            .checked_mul(self.nodes)?
            .checked_mul(self.wrap_templates)?
            .checked_mul(self.positions)
    }
}

/// The search space for one node count and nesting level.
#[derive(Clone, Debug)]
pub struct CombinationSpace {
    node_count: usize,
    nesting_level: usize,
    position_pairs: Vec<PositionPair>,
}

impl CombinationSpace {
    /// Builds the space described by a validated configuration.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_shape(config.node_count, config.nesting_level)
    }

    /// Builds a space from its shape directly.
    ///
    /// # Panics
    ///
    /// Panics if `node_count` is zero.
    #[must_use]
    pub fn with_shape(node_count: usize, nesting_level: usize) -> Self {
        assert!(node_count > 0, "a candidate needs at least one node");
        Self {
            node_count,
            nesting_level,
            position_pairs: position_pairs(node_count),
        }
    }

    /// Nodes per candidate.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Wrap slots per node.
    #[must_use]
    pub fn nesting_level(&self) -> usize {
        self.nesting_level
    }

    /// `node_count - 1`
    #[must_use]
    pub fn operator_slots(&self) -> usize {
        self.node_count - 1
    }

    /// `node_count * nesting_level`
    #[must_use]
    pub fn wrap_slots(&self) -> usize {
        self.node_count * self.nesting_level
    }

    /// The position-pair domain for this node count.
    #[must_use]
    pub fn position_pairs(&self) -> &[PositionPair] {
        &self.position_pairs
    }

    /// Closed-form dimension sizes.
    ///
    /// # Errors
    ///
    /// [`SpaceError::GenerationOverflow`] if any size exceeds `u128`.
    pub fn sizes(&self) -> Result<DimensionSizes, SpaceError> {
        self.checked_sizes()
            .ok_or_else(|| self.overflow(OverflowReason::Unrepresentable))
    }

    fn checked_sizes(&self) -> Option<DimensionSizes> {
        let terms = TermVocabulary::terms().len();
        let all_nodes = Odometer::count(terms, self.node_count)?;
        let without_variable = Odometer::count(terms - 1, self.node_count)?;

        Some(DimensionSizes {
            operators: Odometer::count(TermVocabulary::operators().len(), self.operator_slots())?,
            nodes: all_nodes - without_variable,
            wrap_templates: Odometer::count(
                TermVocabulary::wrap_templates().len(),
                self.wrap_slots(),
            )?,
            positions: Odometer::count(self.position_pairs.len(), self.wrap_slots())?,
        })
    }

    /// Total number of candidates, computed without enumerating.
    ///
    /// # Errors
    ///
    /// [`SpaceError::GenerationOverflow`] if the count exceeds `u128`.
    pub fn total_candidates(&self) -> Result<u128, SpaceError> {
        self.sizes()?
            .total()
            .ok_or_else(|| self.overflow(OverflowReason::Unrepresentable))
    }

    /// Like [`total_candidates`](Self::total_candidates), but also rejects
    /// spaces larger than `limit`.
    ///
    /// # Errors
    ///
    /// [`SpaceError::GenerationOverflow`] if the space is too large.
    pub fn ensure_within(&self, limit: Option<u128>) -> Result<u128, SpaceError> {
        let total = self.total_candidates()?;
        match limit {
            Some(limit) if total > limit => {
                Err(self.overflow(OverflowReason::AboveLimit { total, limit }))
            }
            _ => Ok(total),
        }
    }

    fn overflow(&self, reason: OverflowReason) -> SpaceError {
        SpaceError::GenerationOverflow {
            node_count: self.node_count,
            nesting_level: self.nesting_level,
            reason,
        }
    }

    // === Individual dimensions ===

    /// Every operator assignment.
    #[must_use]
    pub fn operator_assignments(&self) -> RepeatedPermutations<'static, Operator> {
        RepeatedPermutations::new(TermVocabulary::operators(), self.operator_slots())
    }

    /// Every node assignment that contains the index variable.
    #[must_use]
    pub fn node_assignments(&self) -> NodeAssignments {
        NodeAssignments {
            odometer: NodeOdometer::first(self.node_count),
            done: false,
        }
    }

    /// Every wrap-template assignment.
    #[must_use]
    pub fn wrap_template_assignments(&self) -> RepeatedPermutations<'static, WrapTemplate> {
        RepeatedPermutations::new(TermVocabulary::wrap_templates(), self.wrap_slots())
    }

    /// Every position assignment.
    #[must_use]
    pub fn position_assignments(&self) -> RepeatedPermutations<'_, PositionPair> {
        RepeatedPermutations::new(&self.position_pairs, self.wrap_slots())
    }

    // === The product ===

    /// Lazily yields every candidate, starting at ordinal 0.
    ///
    /// # Errors
    ///
    /// [`SpaceError::GenerationOverflow`] if the space cannot be counted.
    pub fn candidates(&self) -> Result<CandidateStream<'_>, SpaceError> {
        self.candidates_from(0)
    }

    /// Lazily yields every candidate from `ordinal` onwards; used to resume
    /// an interrupted scan.
    ///
    /// # Errors
    ///
    /// [`SpaceError::GenerationOverflow`] if the space cannot be counted,
    /// [`SpaceError::OrdinalOutOfRange`] if `ordinal > total`.
    pub fn candidates_from(&self, ordinal: u128) -> Result<CandidateStream<'_>, SpaceError> {
        let sizes = self.sizes()?;
        let total = sizes
            .total()
            .ok_or_else(|| self.overflow(OverflowReason::Unrepresentable))?;

        if ordinal > total {
            return Err(SpaceError::OrdinalOutOfRange { ordinal, total });
        }
        if ordinal == total {
            return Ok(CandidateStream::exhausted(self, total));
        }

        let mut rest = ordinal;
        let position_index = rest % sizes.positions;
        rest /= sizes.positions;
        let wrap_index = rest % sizes.wrap_templates;
        rest /= sizes.wrap_templates;
        let node_index = rest % sizes.nodes;
        let operator_index = rest / sizes.nodes;

        let out_of_range = SpaceError::OrdinalOutOfRange { ordinal, total };
        let terms = TermVocabulary::terms().len();
        Ok(CandidateStream {
            space: self,
            operators: Odometer::at(
                TermVocabulary::operators().len(),
                self.operator_slots(),
                operator_index,
            )
            .ok_or_else(|| out_of_range.clone())?,
            nodes: NodeOdometer::at(terms, self.node_count, node_index)
                .ok_or_else(|| out_of_range.clone())?,
            wraps: Odometer::at(
                TermVocabulary::wrap_templates().len(),
                self.wrap_slots(),
                wrap_index,
            )
            .ok_or_else(|| out_of_range.clone())?,
            positions: Odometer::at(self.position_pairs.len(), self.wrap_slots(), position_index)
                .ok_or(out_of_range)?,
            next_ordinal: ordinal,
            total,
        })
    }

    fn describe(
        &self,
        operators: &Odometer,
        nodes: &NodeOdometer,
        wraps: &Odometer,
        positions: &Odometer,
    ) -> CandidateDescriptor {
        let terms = TermVocabulary::terms();
        let ops = TermVocabulary::operators();
        let templates = TermVocabulary::wrap_templates();

        CandidateDescriptor {
            nodes: nodes.inner.digits().iter().map(|&d| terms[d]).collect(),
            operators: operators.digits().iter().map(|&d| ops[d]).collect(),
            wrap_templates: wraps.digits().iter().map(|&d| templates[d]).collect(),
            positions: positions
                .digits()
                .iter()
                .map(|&d| self.position_pairs[d])
                .collect(),
        }
    }
}

/// Position of the index variable in the term list.
fn variable_digit() -> usize {
    TermVocabulary::terms()
        .iter()
        .position(|t| t.is_variable())
        .unwrap_or(0)
}

/// Number of ways to fill `remaining` slots from `radix` terms, given
/// whether the variable has already been placed.
fn completions(radix: usize, remaining: usize, satisfied: bool) -> Option<u128> {
    let all = Odometer::count(radix, remaining)?;
    if satisfied {
        Some(all)
    } else {
        Some(all - Odometer::count(radix - 1, remaining)?)
    }
}

/// An odometer over node tuples that skips tuples without the variable.
#[derive(Clone, Debug, PartialEq, Eq)]
struct NodeOdometer {
    inner: Odometer,
    variable: usize,
}

impl NodeOdometer {
    fn first(len: usize) -> Self {
        let mut odometer = Self {
            inner: Odometer::new(TermVocabulary::terms().len(), len),
            variable: variable_digit(),
        };
        if !odometer.is_valid() {
            odometer.advance();
        }
        odometer
    }

    /// The `ordinal`-th valid tuple in lexicographic order.
    fn at(radix: usize, len: usize, mut ordinal: u128) -> Option<Self> {
        let variable = variable_digit();
        let mut digits = Digits::with_capacity(len);
        let mut satisfied = false;

        for position in 0..len {
            let remaining = len - position - 1;
            let mut placed = false;
            for digit in 0..radix {
                let now_satisfied = satisfied || digit == variable;
                let block = completions(radix, remaining, now_satisfied)?;
                if ordinal < block {
                    digits.push(digit);
                    satisfied = now_satisfied;
                    placed = true;
                    break;
                }
                ordinal -= block;
            }
            if !placed {
                return None;
            }
        }

        Some(Self {
            inner: Odometer::with_digits(radix, digits),
            variable,
        })
    }

    fn is_valid(&self) -> bool {
        self.inner.digits().contains(&self.variable)
    }

    /// Steps to the next valid tuple; returns `true` on wrap-around.
    fn advance(&mut self) -> bool {
        let mut wrapped = false;
        loop {
            wrapped |= self.inner.advance();
            if self.is_valid() {
                return wrapped;
            }
        }
    }
}

/// Iterator over node assignments containing the index variable.
#[derive(Clone, Debug)]
pub struct NodeAssignments {
    odometer: NodeOdometer,
    done: bool,
}

impl Iterator for NodeAssignments {
    type Item = Vec<Term>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let terms = TermVocabulary::terms();
        let item = self.odometer.inner.digits().iter().map(|&d| terms[d]).collect();
        self.done = self.odometer.advance();
        Some(item)
    }
}

/// A lazy, resumable stream of `(ordinal, candidate)` pairs.
#[derive(Clone, Debug)]
pub struct CandidateStream<'a> {
    space: &'a CombinationSpace,
    operators: Odometer,
    nodes: NodeOdometer,
    wraps: Odometer,
    positions: Odometer,
    next_ordinal: u128,
    total: u128,
}

impl<'a> CandidateStream<'a> {
    fn exhausted(space: &'a CombinationSpace, total: u128) -> Self {
        let terms = TermVocabulary::terms().len();
        Self {
            space,
            operators: Odometer::new(TermVocabulary::operators().len(), space.operator_slots()),
            nodes: NodeOdometer {
                inner: Odometer::new(terms, space.node_count),
                variable: variable_digit(),
            },
            wraps: Odometer::new(TermVocabulary::wrap_templates().len(), space.wrap_slots()),
            positions: Odometer::new(space.position_pairs.len(), space.wrap_slots()),
            next_ordinal: total,
            total,
        }
    }

    /// Ordinal of the candidate the next call to `next` will yield.
    #[must_use]
    pub fn position(&self) -> u128 {
        self.next_ordinal
    }

    /// Size of the whole space.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Candidates not yet yielded.
    #[must_use]
    pub fn remaining(&self) -> u128 {
        self.total - self.next_ordinal
    }
}

impl Iterator for CandidateStream<'_> {
    type Item = (u128, CandidateDescriptor);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_ordinal >= self.total {
            return None;
        }

        let descriptor =
            self.space
                .describe(&self.operators, &self.nodes, &self.wraps, &self.positions);
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        // Innermost dimension first; each carry ripples outward.
        if self.positions.advance() && self.wraps.advance() && self.nodes.advance() {
            self.operators.advance();
        }

        Some((ordinal, descriptor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_counts() {
        let space = CombinationSpace::with_shape(3, 2);
        assert_eq!(space.operator_slots(), 2);
        assert_eq!(space.wrap_slots(), 6);
        assert_eq!(space.position_pairs().len(), 7);
    }

    #[test]
    fn test_three_node_total() {
        let space = CombinationSpace::with_shape(3, 1);
        let sizes = space.sizes().unwrap();
        assert_eq!(sizes.operators, 36);
        assert_eq!(sizes.nodes, 1000 - 729);
        assert_eq!(sizes.wrap_templates, 13u128.pow(3));
        assert_eq!(sizes.positions, 7u128.pow(3));
        assert_eq!(
            space.total_candidates().unwrap(),
            36 * 271 * 2197 * 343
        );
    }

    #[test]
    fn test_single_node_space_is_enumerable() {
        // One node must be `n`; no operators; one wrap over 2 position pairs.
        let space = CombinationSpace::with_shape(1, 1);
        assert_eq!(space.total_candidates().unwrap(), 13 * 2);

        let all: Vec<_> = space.candidates().unwrap().collect();
        assert_eq!(all.len(), 26);
        for (i, (ordinal, candidate)) in all.iter().enumerate() {
            assert_eq!(*ordinal, i as u128);
            assert_eq!(candidate.nodes, vec![Term::Index]);
            assert!(candidate.operators.is_empty());
            assert_eq!(candidate.wrap_templates.len(), 1);
            assert_eq!(candidate.positions.len(), 1);
        }
        assert_eq!(all[0].1.positions[0], PositionPair::span(0, 0));
        assert!(all[1].1.positions[0].is_absent());
        assert_eq!(all[2].1.wrap_templates[0], TermVocabulary::wrap_templates()[1]);
    }

    #[test]
    fn test_node_assignments_require_variable() {
        let space = CombinationSpace::with_shape(3, 1);
        let assignments: Vec<_> = space.node_assignments().collect();
        assert_eq!(assignments.len(), 271);
        assert!(assignments.iter().all(|a| a.contains(&Term::Index)));
        assert_eq!(assignments[0], vec![Term::Index, Term::Index, Term::Index]);
    }

    #[test]
    fn test_node_odometer_random_access() {
        let space = CombinationSpace::with_shape(3, 1);
        for (ordinal, expected) in space.node_assignments().enumerate() {
            let odometer = NodeOdometer::at(10, 3, ordinal as u128).unwrap();
            let terms: Vec<_> = odometer
                .inner
                .digits()
                .iter()
                .map(|&d| TermVocabulary::terms()[d])
                .collect();
            assert_eq!(terms, expected);
        }
        assert!(NodeOdometer::at(10, 3, 271).is_none());
    }

    #[test]
    fn test_resume_matches_full_scan() {
        let space = CombinationSpace::with_shape(2, 1);
        let total = space.total_candidates().unwrap();
        let full: Vec<_> = space.candidates().unwrap().take(5000).collect();

        for start in [0u128, 1, 6, 7, 169, 1234, 4321] {
            let resumed: Vec<_> = space
                .candidates_from(start)
                .unwrap()
                .take(200)
                .collect();
            let expected: Vec<_> = full
                .iter()
                .skip(start as usize)
                .take(200)
                .cloned()
                .collect();
            assert_eq!(resumed, expected, "resume from {start}");
        }

        assert_eq!(space.candidates_from(total).unwrap().count(), 0);
        assert!(matches!(
            space.candidates_from(total + 1),
            Err(SpaceError::OrdinalOutOfRange { .. })
        ));
    }

    #[test]
    fn test_stream_length_matches_closed_form() {
        let space = CombinationSpace::with_shape(2, 1);
        let total = space.total_candidates().unwrap();
        let stream = space.candidates().unwrap();
        assert_eq!(stream.total(), total);
        assert_eq!(stream.count() as u128, total);
    }

    #[test]
    fn test_generation_overflow() {
        let space = CombinationSpace::with_shape(12, 4);
        assert!(matches!(
            space.total_candidates(),
            Err(SpaceError::GenerationOverflow {
                reason: OverflowReason::Unrepresentable,
                ..
            })
        ));
        assert!(space.candidates().is_err());

        let small = CombinationSpace::with_shape(2, 1);
        assert!(matches!(
            small.ensure_within(Some(10)),
            Err(SpaceError::GenerationOverflow {
                reason: OverflowReason::AboveLimit { limit: 10, .. },
                ..
            })
        ));
        assert!(small.ensure_within(None).is_ok());
    }
}
