//! Arena storage for one candidate's expression tree.
//!
//! Nodes are hash-consed: a subtree such as `sin(n)` that appears twice in
//! the same candidate is stored once and both parents share its handle.

use hashbrown::HashMap;

use crate::expr::{ExprHandle, ExprNode};
use crate::vocabulary::{Function, Operator, Term};

/// Contiguous, hash-consed storage for expression nodes.
#[derive(Debug, Default, Clone)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
    intern_map: HashMap<ExprNode, ExprHandle>,
}

impl ExprArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            intern_map: HashMap::with_capacity(capacity),
        }
    }

    /// Interns a node, returning the existing handle if an identical node
    /// is already stored.
    ///
    /// # Panics
    ///
    /// Panics if the arena would exceed `u32::MAX` nodes.
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = self.nodes.len();
        assert!(index < u32::MAX as usize, "arena capacity exceeded");

        let handle = ExprHandle::new(index as u32);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Returns the node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Number of distinct nodes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node, keeping the allocations for reuse.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.intern_map.clear();
    }

    /// Returns true if the subtree rooted at `root` references the index
    /// variable.
    #[must_use]
    pub fn mentions_index(&self, root: ExprHandle) -> bool {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let node = self.get(handle);
            if node.is_index() {
                return true;
            }
            stack.extend(node.children());
        }
        false
    }

    // === Convenience constructors ===

    /// Interns a term.
    pub fn term(&mut self, term: Term) -> ExprHandle {
        self.intern(ExprNode::Term(term))
    }

    /// Interns a binary operation.
    pub fn binary(&mut self, op: Operator, lhs: ExprHandle, rhs: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Binary { op, lhs, rhs })
    }

    /// Interns a function call.
    pub fn call(&mut self, func: Function, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Call { func, arg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_consing() {
        let mut arena = ExprArena::new();

        let n = arena.term(Term::Index);
        let one = arena.term(Term::One);

        let sum1 = arena.binary(Operator::Add, n, one);
        let sum2 = arena.binary(Operator::Add, n, one);
        assert_eq!(sum1, sum2);

        // n, 1, (n + 1)
        assert_eq!(arena.len(), 3);

        let flipped = arena.binary(Operator::Add, one, n);
        assert_ne!(sum1, flipped);
    }

    #[test]
    fn test_mentions_index() {
        let mut arena = ExprArena::new();
        let pi = arena.term(Term::Pi);
        let e = arena.term(Term::E);
        let constant = arena.binary(Operator::Mul, pi, e);
        assert!(!arena.mentions_index(constant));

        let n = arena.term(Term::Index);
        let wrapped = arena.call(Function::Sqrt, n);
        let expr = arena.binary(Operator::Sub, constant, wrapped);
        assert!(arena.mentions_index(expr));
    }

    #[test]
    fn test_nested_calls_and_clear() {
        let mut arena = ExprArena::with_capacity(8);
        let n = arena.term(Term::Index);
        let sin = arena.call(Function::Sin, n);
        let cos = arena.call(Function::Cos, sin);
        assert_eq!(arena.len(), 3);
        assert!(arena.mentions_index(cos));

        arena.clear();
        assert!(arena.is_empty());
    }
}
