//! Search command
//!
//! Runs both binary-search variants over `1..=len` for one target.

use crate::core::{Sequence, SequenceError};
use crate::search::{SearchOutcome, search, search_iterative, worst_case_attempts};

/// Result of a search run
pub struct SearchReport {
    pub target: i64,
    pub len: usize,
    pub recursive: SearchOutcome,
    pub iterative: SearchOutcome,
    pub worst_case: usize,
}

impl SearchReport {
    /// Value at the found index, if any
    #[must_use]
    pub fn found_value(&self, sequence: &Sequence) -> Option<i64> {
        self.recursive.index.map(|i| sequence.as_slice()[i])
    }
}

/// Search for `target` in `1..=len`
///
/// # Errors
///
/// Returns `SequenceError` if `len < 1`.
pub fn run_search(target: i64, len: i64) -> Result<(Sequence, SearchReport), SequenceError> {
    let sequence = Sequence::one_to(len)?;
    let values = sequence.as_slice();
    let high = values.len() - 1;

    let report = SearchReport {
        target,
        len: values.len(),
        recursive: search(values, 0, high, target),
        iterative: search_iterative(values, 0, high, target),
        worst_case: worst_case_attempts(values.len()),
    };
    Ok((sequence, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_in_one_to_ten() {
        let (sequence, report) = run_search(7, 10).unwrap();
        assert_eq!(report.recursive.index, Some(6));
        assert_eq!(report.recursive, report.iterative);
        assert!(report.recursive.attempts <= 4);
        assert_eq!(report.found_value(&sequence), Some(7));
        assert_eq!(report.worst_case, 4);
    }

    #[test]
    fn absent_target() {
        let (sequence, report) = run_search(0, 10).unwrap();
        assert!(!report.recursive.found());
        assert_eq!(report.found_value(&sequence), None);
    }

    #[test]
    fn empty_range_is_error() {
        assert!(run_search(1, 0).is_err());
    }

    #[test]
    fn huge_range_is_rejected_without_allocating() {
        assert!(matches!(
            run_search(5, i64::MAX),
            Err(SequenceError::RangeTooLarge { .. })
        ));
    }
}
