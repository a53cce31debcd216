//! # primeseek-core
//!
//! Shared building blocks for the primeseek expression search.
//!
//! This crate provides:
//! - The static term, operator and wrap-template vocabulary
//! - A hash-consed arena for typed expression trees
//! - The immutable [`SearchConfig`] threaded through every component

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod config;
pub mod expr;
pub mod vocabulary;

pub use arena::ExprArena;
pub use config::{ConfigError, SearchConfig};
pub use expr::{ExprHandle, ExprNode};
pub use vocabulary::{
    Function, MathConstants, Operator, Term, TermKind, TermVocabulary, WrapTemplate,
    TARGET_PRIMES,
};
