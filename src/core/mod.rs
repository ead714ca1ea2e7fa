//! Core domain types
//!
//! Candidate sequences for the guessing game, and items, instances and
//! patterns for cutting stock. Everything here is plain data with no solver
//! dependencies.

mod item;
mod pattern;
mod sequence;

pub use item::{Instance, InstanceError, Item};
pub use pattern::{Pattern, PatternPool};
pub use sequence::{Sequence, SequenceError};
