//! Typed expression nodes.
//!
//! Assembled candidates are stored as trees of [`ExprNode`]s inside an
//! [`ExprArena`](crate::ExprArena), addressed by 32-bit [`ExprHandle`]s.

use std::fmt;

use smallvec::SmallVec;

use crate::vocabulary::{Function, Operator, Term};

/// A handle to a node in an [`ExprArena`](crate::ExprArena).
///
/// Handles from the same arena compare equal iff they address structurally
/// identical subtrees.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprHandle(u32);

impl ExprHandle {
    /// Wraps a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}

/// A node of an assembled expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    /// A vocabulary term.
    Term(Term),

    /// A binary operation between two subexpressions.
    Binary {
        /// The operator.
        op: Operator,
        /// Left operand.
        lhs: ExprHandle,
        /// Right operand.
        rhs: ExprHandle,
    },

    /// A unary function applied to a subexpression.
    Call {
        /// The function.
        func: Function,
        /// Its argument.
        arg: ExprHandle,
    },
}

impl ExprNode {
    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(self, ExprNode::Term(_))
    }

    /// Returns true if this node is the index variable.
    #[must_use]
    pub fn is_index(&self) -> bool {
        matches!(self, ExprNode::Term(Term::Index))
    }

    /// Returns the children of this node, left to right.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 2]> {
        match self {
            ExprNode::Term(_) => SmallVec::new(),
            ExprNode::Binary { lhs, rhs, .. } => smallvec::smallvec![*lhs, *rhs],
            ExprNode::Call { arg, .. } => smallvec::smallvec![*arg],
        }
    }
}
