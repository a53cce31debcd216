//! # primeseek-eval
//!
//! Numeric evaluation of assembled expressions.
//!
//! Each candidate is sampled at `n = 0, 1, ..., iteration_limit`. A sample
//! either yields a finite real, snapped to the nearest integer when it lies
//! within the precision tolerance, or the single error marker. Failures are
//! values here, never panics:
//!
//! ```
//! use primeseek_core::{Operator, SearchConfig, Term};
//! use primeseek_build::ExpressionBuilder;
//! use primeseek_eval::EvaluationEngine;
//! use primeseek_space::CandidateDescriptor;
//!
//! let descriptor = CandidateDescriptor::unwrapped(
//!     vec![Term::One, Term::Index],
//!     vec![Operator::Div],
//! );
//! let expr = ExpressionBuilder::new().build(&descriptor).unwrap();
//! let config = SearchConfig { iteration_limit: 2, ..SearchConfig::default() };
//! let set = EvaluationEngine::new(&config).evaluate(&expr);
//! assert_eq!(set.to_string(), "[0.5, 1.0, error]");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod interpreter;
pub mod outcome;
pub mod special;

#[cfg(test)]
mod proptests;

pub use engine::EvaluationEngine;
pub use interpreter::evaluate;
pub use outcome::{normalize, Finite, Outcome, ValueSet};
pub use special::{apply_binary, apply_function, gamma, EvalError};
