//! Assembly of a candidate descriptor into an evaluable expression.

use std::fmt;

use primeseek_core::{ExprArena, ExprHandle};
use primeseek_space::CandidateDescriptor;
use smallvec::SmallVec;
use thiserror::Error;

use crate::parse::{self, ParseError};
use crate::slot::NodeSlot;

/// A descriptor that cannot be assembled into a balanced expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("candidate has no nodes")]
    NoNodes,

    #[error("{operators} operators cannot join {nodes} nodes")]
    OperatorCount { nodes: usize, operators: usize },

    #[error("{templates} wrap templates but {positions} positions")]
    SlotCount { templates: usize, positions: usize },

    #[error("wrap slot {slot} targets node {node} of {nodes}")]
    SlotOutOfRange { slot: usize, node: usize, nodes: usize },

    #[error("wrap slot {slot} has only one side")]
    OneSided { slot: usize },

    #[error("wrap slot {slot} closes at node {right} before it opens at node {left}")]
    Inverted { slot: usize, left: usize, right: usize },

    #[error("unbalanced expression: {0}")]
    Unbalanced(#[from] ParseError),
}

/// A candidate rendered to text and to a typed tree.
#[derive(Clone, Debug)]
pub struct AssembledExpression {
    text: String,
    arena: ExprArena,
    root: ExprHandle,
    variable_slots: SmallVec<[usize; 4]>,
}

impl AssembledExpression {
    /// The rendered expression, e.g. `sin(n+PI)*E`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Storage for the tree.
    #[must_use]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> ExprHandle {
        self.root
    }

    /// Node slots holding the index variable.
    #[must_use]
    pub fn variable_slots(&self) -> &[usize] {
        &self.variable_slots
    }
}

impl fmt::Display for AssembledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Turns candidate descriptors into [`AssembledExpression`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpressionBuilder;

impl ExpressionBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies every wrap slot to its target nodes, in slot order.
    ///
    /// # Errors
    ///
    /// Returns an [`AssemblyError`] for descriptors whose shape or wrap
    /// positions are inconsistent.
    pub fn slots(&self, descriptor: &CandidateDescriptor) -> Result<Vec<NodeSlot>, AssemblyError> {
        let nodes = descriptor.nodes.len();
        if nodes == 0 {
            return Err(AssemblyError::NoNodes);
        }
        if descriptor.operators.len() + 1 != nodes {
            return Err(AssemblyError::OperatorCount {
                nodes,
                operators: descriptor.operators.len(),
            });
        }
        if descriptor.wrap_templates.len() != descriptor.positions.len() {
            return Err(AssemblyError::SlotCount {
                templates: descriptor.wrap_templates.len(),
                positions: descriptor.positions.len(),
            });
        }

        let mut slots: Vec<NodeSlot> = descriptor.nodes.iter().copied().map(NodeSlot::new).collect();

        for (slot, (template, pair)) in descriptor
            .wrap_templates
            .iter()
            .zip(&descriptor.positions)
            .enumerate()
        {
            let (left, right) = match (pair.left, pair.right) {
                (None, None) => continue,
                (Some(left), Some(right)) => (left, right),
                _ => return Err(AssemblyError::OneSided { slot }),
            };
            for node in [left, right] {
                if node >= nodes {
                    return Err(AssemblyError::SlotOutOfRange { slot, node, nodes });
                }
            }
            if left > right {
                return Err(AssemblyError::Inverted { slot, left, right });
            }

            slots[left].open(*template);
            slots[right].close(*template);
        }

        Ok(slots)
    }

    /// Assembles a descriptor into text and a typed tree.
    ///
    /// # Errors
    ///
    /// Returns an [`AssemblyError`] if the descriptor is inconsistent or
    /// the stacked wraps do not balance.
    pub fn build(
        &self,
        descriptor: &CandidateDescriptor,
    ) -> Result<AssembledExpression, AssemblyError> {
        let slots = self.slots(descriptor)?;
        let tokens = parse::tokenize(&slots, &descriptor.operators);

        let mut arena = ExprArena::with_capacity(tokens.len());
        let root = parse::parse(&tokens, &mut arena)?;

        let variable_slots = descriptor
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, term)| term.is_variable())
            .map(|(i, _)| i)
            .collect();

        Ok(AssembledExpression {
            text: parse::render(&tokens),
            arena,
            root,
            variable_slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primeseek_core::{ExprNode, Function, Operator, Term, WrapTemplate};
    use primeseek_space::PositionPair;

    fn sin() -> WrapTemplate {
        WrapTemplate::Call(Function::Sin)
    }

    fn cos() -> WrapTemplate {
        WrapTemplate::Call(Function::Cos)
    }

    #[test]
    fn test_plain_expression() {
        let descriptor = CandidateDescriptor::unwrapped(
            vec![Term::Index, Term::Pi, Term::NegOne],
            vec![Operator::Mul, Operator::Add],
        );
        let expr = ExpressionBuilder::new().build(&descriptor).unwrap();
        assert_eq!(expr.text(), "n*PI+-1.0");
        assert_eq!(expr.variable_slots(), &[0]);
    }

    #[test]
    fn test_last_wrap_encloses_earlier_ones() {
        let descriptor = CandidateDescriptor::unwrapped(vec![Term::Index], vec![])
            .with_wrap(sin(), PositionPair::span(0, 0))
            .with_wrap(cos(), PositionPair::span(0, 0));
        let expr = ExpressionBuilder::new().build(&descriptor).unwrap();
        assert_eq!(expr.text(), "cos(sin(n))");

        match expr.arena().get(expr.root()) {
            ExprNode::Call { func, arg } => {
                assert_eq!(*func, Function::Cos);
                assert!(matches!(
                    expr.arena().get(*arg),
                    ExprNode::Call { func: Function::Sin, .. }
                ));
            }
            other => panic!("unexpected root {other:?}"),
        }
    }

    #[test]
    fn test_spanning_wrap() {
        let descriptor = CandidateDescriptor::unwrapped(
            vec![Term::Index, Term::One, Term::Pi],
            vec![Operator::Add, Operator::Mul],
        )
        .with_wrap(WrapTemplate::Paren, PositionPair::span(0, 1))
        .with_wrap(sin(), PositionPair::ABSENT);
        let expr = ExpressionBuilder::new().build(&descriptor).unwrap();
        assert_eq!(expr.text(), "(n+1.0)*PI");
        assert!(matches!(
            expr.arena().get(expr.root()),
            ExprNode::Binary { op: Operator::Mul, .. }
        ));
    }

    #[test]
    fn test_overlapping_spans_follow_rendered_text() {
        // sin over nodes 0..=1, cos over nodes 1..=2.
        let descriptor = CandidateDescriptor::unwrapped(
            vec![Term::Index, Term::One, Term::Pi],
            vec![Operator::Add, Operator::Add],
        )
        .with_wrap(sin(), PositionPair::span(0, 1))
        .with_wrap(cos(), PositionPair::span(1, 2));
        let expr = ExpressionBuilder::new().build(&descriptor).unwrap();
        assert_eq!(expr.text(), "sin(n+cos(1.0)+PI)");
        assert!(matches!(
            expr.arena().get(expr.root()),
            ExprNode::Call { func: Function::Sin, .. }
        ));
    }

    #[test]
    fn test_rejects_inconsistent_descriptors() {
        let builder = ExpressionBuilder::new();

        let one_sided = CandidateDescriptor::unwrapped(vec![Term::Index], vec![]).with_wrap(
            sin(),
            PositionPair {
                left: Some(0),
                right: None,
            },
        );
        assert_eq!(
            builder.build(&one_sided).unwrap_err(),
            AssemblyError::OneSided { slot: 0 }
        );

        let inverted = CandidateDescriptor::unwrapped(
            vec![Term::Index, Term::One],
            vec![Operator::Add],
        )
        .with_wrap(sin(), PositionPair::span(1, 0));
        assert!(matches!(
            builder.build(&inverted),
            Err(AssemblyError::Inverted { slot: 0, left: 1, right: 0 })
        ));

        let out_of_range = CandidateDescriptor::unwrapped(vec![Term::Index], vec![])
            .with_wrap(sin(), PositionPair::span(0, 3));
        assert!(matches!(
            builder.build(&out_of_range),
            Err(AssemblyError::SlotOutOfRange { node: 3, .. })
        ));

        let missing_operator =
            CandidateDescriptor::unwrapped(vec![Term::Index, Term::One], vec![]);
        assert!(matches!(
            builder.build(&missing_operator),
            Err(AssemblyError::OperatorCount { nodes: 2, operators: 0 })
        ));

        let empty = CandidateDescriptor::unwrapped(vec![], vec![]);
        assert_eq!(builder.build(&empty).unwrap_err(), AssemblyError::NoNodes);
    }
}
