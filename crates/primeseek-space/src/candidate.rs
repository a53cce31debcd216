//! One fully specified point of the candidate space.

use primeseek_core::{Operator, Term, WrapTemplate};

use crate::positions::PositionPair;

/// Node terms, operators and wrap assignments for a single candidate,
/// before assembly into an expression.
///
/// Generated descriptors always satisfy `operators.len() == nodes.len() - 1`
/// and `wrap_templates.len() == positions.len() == nodes.len() * nesting`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CandidateDescriptor {
    /// Term in each node slot.
    pub nodes: Vec<Term>,
    /// Operator between node `i` and node `i + 1`.
    pub operators: Vec<Operator>,
    /// Template used by wrap slot `k`.
    pub wrap_templates: Vec<WrapTemplate>,
    /// Node range wrap slot `k` is attached to.
    pub positions: Vec<PositionPair>,
}

impl CandidateDescriptor {
    /// A descriptor without any wraps.
    #[must_use]
    pub fn unwrapped(nodes: Vec<Term>, operators: Vec<Operator>) -> Self {
        Self {
            nodes,
            operators,
            wrap_templates: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Adds one wrap slot; used when building descriptors by hand.
    #[must_use]
    pub fn with_wrap(mut self, template: WrapTemplate, position: PositionPair) -> Self {
        self.wrap_templates.push(template);
        self.positions.push(position);
        self
    }

    /// Number of node slots.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of wrap slots.
    #[must_use]
    pub fn wrap_slots(&self) -> usize {
        self.wrap_templates.len()
    }

    /// Returns true if some node holds the index variable.
    #[must_use]
    pub fn contains_variable(&self) -> bool {
        self.nodes.iter().any(|t| t.is_variable())
    }
}
