//! # primeseek-build
//!
//! Turns candidate descriptors into balanced, evaluable expressions.
//!
//! Assembly happens in three steps:
//! 1. Each wrap slot pushes its prefix onto the left buffer of one node and
//!    its suffix onto the right buffer of another ([`NodeSlot`]).
//! 2. Slots and operators are flattened into a [`Token`] stream.
//! 3. The stream is rendered to text and parsed into a typed tree.
//!
//! There is no textual evaluation anywhere; the tree is what gets evaluated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod parse;
pub mod slot;

#[cfg(test)]
mod proptests;

pub use builder::{AssembledExpression, AssemblyError, ExpressionBuilder};
pub use parse::{parse, render, tokenize, ParseError, Token};
pub use slot::NodeSlot;
