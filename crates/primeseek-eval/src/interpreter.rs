//! Tree-walking interpreter for assembled expressions.

use primeseek_core::{ExprArena, ExprHandle, ExprNode};

use crate::special::{apply_binary, apply_function, finite, EvalError};

/// Evaluates the tree rooted at `root` with the index variable bound to `n`.
///
/// # Errors
///
/// The first arithmetic failure encountered, bottom-up and left to right.
pub fn evaluate(arena: &ExprArena, root: ExprHandle, n: f64) -> Result<f64, EvalError> {
    match arena.get(root) {
        ExprNode::Term(term) => finite(term.value(n)),
        ExprNode::Binary { op, lhs, rhs } => {
            let lhs = evaluate(arena, *lhs, n)?;
            let rhs = evaluate(arena, *rhs, n)?;
            apply_binary(*op, lhs, rhs)
        }
        ExprNode::Call { func, arg } => {
            let arg = evaluate(arena, *arg, n)?;
            apply_function(*func, arg)
        }
    }
}
