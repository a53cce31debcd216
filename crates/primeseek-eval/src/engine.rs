//! Sampling of assembled expressions across the index range.

use primeseek_build::AssembledExpression;
use primeseek_core::{ExprArena, ExprHandle, SearchConfig};
use tracing::trace;

use crate::interpreter;
use crate::outcome::{normalize, Outcome, ValueSet};

/// Evaluates candidates at `n = 0..=iteration_limit`.
///
/// Failures are recovered per sample: a failing `n` contributes
/// [`Outcome::Error`] and every other sample still runs.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationEngine {
    iteration_limit: u32,
    tolerance: f64,
}

impl EvaluationEngine {
    /// Creates an engine using the sampling parameters of `config`.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            iteration_limit: config.iteration_limit,
            tolerance: config.precision_tolerance,
        }
    }

    /// Collects the distinct outcomes of `expr` over every sample.
    #[must_use]
    pub fn evaluate(&self, expr: &AssembledExpression) -> ValueSet {
        self.evaluate_tree(expr.arena(), expr.root())
    }

    /// Like [`evaluate`](Self::evaluate), for a bare tree.
    #[must_use]
    pub fn evaluate_tree(&self, arena: &ExprArena, root: ExprHandle) -> ValueSet {
        (0..=self.iteration_limit)
            .map(|n| self.sample(arena, root, f64::from(n)))
            .collect()
    }

    /// Evaluates one sample and normalizes its value.
    #[must_use]
    pub fn sample(&self, arena: &ExprArena, root: ExprHandle, n: f64) -> Outcome {
        match interpreter::evaluate(arena, root, n) {
            Ok(value) => Outcome::value(normalize(value, self.tolerance)),
            Err(err) => {
                trace!(n, %err, "sample failed");
                Outcome::Error
            }
        }
    }
}
