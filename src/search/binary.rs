//! Binary search with attempt counting
//!
//! Classic divide and conquer over an inclusive index range. The midpoint is
//! always the floor of `(low + high) / 2`, which keeps two-element ranges
//! shrinking. Every probe of the sequence counts as one attempt, including
//! the probe that finds the target.
//!
//! The sequence is assumed to be sorted ascending. Nothing is validated: an
//! unsorted slice or an absent target simply ends in `index: None`.

use std::cmp::Ordering;

/// Result of a search: where the target was found and how many probes it took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Index of the target, or `None` once the bounds cross
    pub index: Option<usize>,
    /// Number of midpoint probes made
    pub attempts: usize,
}

impl SearchOutcome {
    #[inline]
    #[must_use]
    pub const fn found(&self) -> bool {
        self.index.is_some()
    }
}

/// Search `sequence[low..=high]` for `target`, recursively
///
/// Recursion depth is bounded by `log2(high - low + 1) + 1`. A `high` past
/// the end of the slice is clamped to the last index.
///
/// # Examples
/// ```
/// use mip_katas::search::search;
///
/// let seq: Vec<i64> = (1..=10).collect();
/// let outcome = search(&seq, 0, 9, 7);
/// assert_eq!(outcome.index, Some(6));
/// assert_eq!(outcome.attempts, 4);
///
/// let missing = search(&seq, 0, 9, 42);
/// assert_eq!(missing.index, None);
/// ```
#[must_use]
pub fn search(sequence: &[i64], low: usize, high: usize, target: i64) -> SearchOutcome {
    let mut attempts = 0;
    let index = match clamp_high(sequence, high) {
        Some(high) => probe(sequence, low, high, target, &mut attempts),
        None => None,
    };
    SearchOutcome { index, attempts }
}

fn probe(sequence: &[i64], low: usize, high: usize, target: i64, attempts: &mut usize) -> Option<usize> {
    if high < low {
        return None;
    }

    *attempts += 1;
    let mid = low + (high - low) / 2;

    match sequence[mid].cmp(&target) {
        Ordering::Equal => Some(mid),
        Ordering::Greater => {
            // Left half is empty when mid is the first index
            let upper = mid.checked_sub(1)?;
            probe(sequence, low, upper, target, attempts)
        }
        Ordering::Less => probe(sequence, mid + 1, high, target, attempts),
    }
}

/// Search `sequence[low..=high]` for `target` with an explicit loop
///
/// Same probes, same attempt count and same result as [`search`], without
/// growing the call stack.
#[must_use]
pub fn search_iterative(sequence: &[i64], low: usize, high: usize, target: i64) -> SearchOutcome {
    let mut attempts = 0;
    let Some(mut high) = clamp_high(sequence, high) else {
        return SearchOutcome { index: None, attempts };
    };
    let mut low = low;

    while low <= high {
        attempts += 1;
        let mid = low + (high - low) / 2;

        match sequence[mid].cmp(&target) {
            Ordering::Equal => {
                return SearchOutcome {
                    index: Some(mid),
                    attempts,
                };
            }
            Ordering::Greater => match mid.checked_sub(1) {
                Some(upper) => high = upper,
                None => break,
            },
            Ordering::Less => low = mid + 1,
        }
    }

    SearchOutcome { index: None, attempts }
}

/// Search the whole sequence
#[must_use]
pub fn binary_search(sequence: &[i64], target: i64) -> SearchOutcome {
    search_iterative(sequence, 0, sequence.len().saturating_sub(1), target)
}

/// Most probes a successful search over `n` elements can need
///
/// Equals `floor(log2 n) + 1`, and zero for an empty sequence.
#[must_use]
pub const fn worst_case_attempts(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// Attempts needed to find each element of the sequence, in order
#[must_use]
pub fn attempt_profile(sequence: &[i64]) -> Vec<usize> {
    sequence
        .iter()
        .map(|&target| binary_search(sequence, target).attempts)
        .collect()
}

fn clamp_high(sequence: &[i64], high: usize) -> Option<usize> {
    if sequence.is_empty() {
        None
    } else {
        Some(high.min(sequence.len() - 1))
    }
}
