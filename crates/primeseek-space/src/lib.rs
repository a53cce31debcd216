//! # primeseek-space
//!
//! Lazy enumeration of the primeseek candidate space.
//!
//! A candidate is one assignment of terms to nodes, operators between the
//! nodes, and wrap templates attached to node ranges. For a given
//! `(node_count, nesting_level)` the number of candidates grows
//! exponentially, so this crate only ever holds the current position:
//!
//! - [`Odometer`]: a mixed-radix counter over fixed-length tuples
//! - [`CombinationSpace`]: the four dimensions and their closed-form sizes
//! - [`CandidateStream`]: the lazy, resumable product of the dimensions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod candidate;
pub mod odometer;
pub mod positions;
pub mod space;

#[cfg(test)]
mod proptests;

pub use candidate::CandidateDescriptor;
pub use odometer::{Odometer, RepeatedPermutations};
pub use positions::{position_pair_count, position_pairs, PositionPair};
pub use space::{
    CandidateStream, CombinationSpace, DimensionSizes, NodeAssignments, OverflowReason,
    SpaceError,
};
