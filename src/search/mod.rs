//! Binary-search oracle
//!
//! Finds a target in a sorted sequence while counting how many probes the
//! search needed. The guessing game's bisection opponent makes exactly the
//! same probes.

mod binary;

pub use binary::{
    SearchOutcome, attempt_profile, binary_search, search, search_iterative, worst_case_attempts,
};
