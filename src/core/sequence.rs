//! Sorted candidate sequences
//!
//! A `Sequence` is the ordered set of numbers a secret can be drawn from.

use std::fmt;

/// An ascending list of distinct integers, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<i64>,
}

/// Error type for invalid sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// `values[index]` is not strictly greater than its predecessor
    NotStrictlyAscending { index: usize },
    /// `start > end` in a range constructor
    EmptyRange { start: i64, end: i64 },
    /// A range constructor would hold more than `max` values
    RangeTooLarge { len: u64, max: u64 },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStrictlyAscending { index } => {
                write!(f, "Sequence must be strictly ascending (violated at index {index})")
            }
            Self::EmptyRange { start, end } => {
                write!(f, "Range {start}..={end} is empty")
            }
            Self::RangeTooLarge { len, max } => {
                write!(f, "Range of {len} values exceeds the limit of {max}")
            }
        }
    }
}

impl std::error::Error for SequenceError {}

impl Sequence {
    /// Most values a range constructor will materialize
    pub const MAX_RANGE_LEN: u64 = 10_000_000;

    /// Create a sequence from arbitrary values
    ///
    /// # Errors
    /// Returns `SequenceError::NotStrictlyAscending` if the values are not
    /// sorted or contain duplicates.
    ///
    /// # Examples
    /// ```
    /// use mip_katas::core::Sequence;
    ///
    /// let seq = Sequence::new(vec![2, 3, 5, 7]).unwrap();
    /// assert_eq!(seq.len(), 4);
    ///
    /// assert!(Sequence::new(vec![3, 2]).is_err());
    /// assert!(Sequence::new(vec![1, 1]).is_err());
    /// ```
    pub fn new(values: Vec<i64>) -> Result<Self, SequenceError> {
        if let Some(pos) = values.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(SequenceError::NotStrictlyAscending { index: pos + 1 });
        }
        Ok(Self { values })
    }

    /// The inclusive range `start..=end`
    ///
    /// # Errors
    /// Returns `SequenceError::EmptyRange` if `start > end` and
    /// `SequenceError::RangeTooLarge` beyond [`MAX_RANGE_LEN`](Self::MAX_RANGE_LEN)
    /// values.
    pub fn range(start: i64, end: i64) -> Result<Self, SequenceError> {
        if start > end {
            return Err(SequenceError::EmptyRange { start, end });
        }
        let span = end.abs_diff(start);
        if span >= Self::MAX_RANGE_LEN {
            return Err(SequenceError::RangeTooLarge {
                len: span.saturating_add(1),
                max: Self::MAX_RANGE_LEN,
            });
        }
        Ok(Self {
            values: (start..=end).collect(),
        })
    }

    /// Candidate numbers `1..=n` as used by the guessing game
    ///
    /// # Errors
    /// Returns `SequenceError::EmptyRange` if `n < 1` and
    /// `SequenceError::RangeTooLarge` if `n` is beyond the range limit.
    pub fn one_to(n: i64) -> Result<Self, SequenceError> {
        Self::range(1, n)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<i64> {
        self.values.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.values.last().copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Values strictly between the two optional exclusive bounds
    #[must_use]
    pub fn between(&self, lower: Option<i64>, upper: Option<i64>) -> &[i64] {
        let start = lower.map_or(0, |lo| self.values.partition_point(|&v| v <= lo));
        let end = upper.map_or(self.values.len(), |hi| {
            self.values.partition_point(|&v| v < hi)
        });
        if start >= end {
            &[]
        } else {
            &self.values[start..end]
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => write!(f, "[{first}..{last}] ({} values)", self.len()),
            _ => write!(f, "[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_builds_inclusive_values() {
        let seq = Sequence::range(1, 10).unwrap();
        assert_eq!(seq.len(), 10);
        assert_eq!(seq.first(), Some(1));
        assert_eq!(seq.last(), Some(10));
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        assert_eq!(
            Sequence::range(5, 4),
            Err(SequenceError::EmptyRange { start: 5, end: 4 })
        );
        assert!(Sequence::one_to(0).is_err());
    }

    #[test]
    fn range_rejects_oversized_spans() {
        let max = Sequence::MAX_RANGE_LEN;
        assert_eq!(
            Sequence::one_to(i64::MAX),
            Err(SequenceError::RangeTooLarge {
                len: i64::MAX as u64,
                max
            })
        );
        assert_eq!(
            Sequence::range(i64::MIN, i64::MAX),
            Err(SequenceError::RangeTooLarge { len: u64::MAX, max })
        );
        assert!(Sequence::one_to(max as i64 + 1).is_err());
        assert_eq!(Sequence::range(-2, 2).map(|s| s.len()), Ok(5));
        assert!(
            Sequence::one_to(i64::MAX)
                .unwrap_err()
                .to_string()
                .contains("exceeds the limit")
        );
    }

    #[test]
    fn new_rejects_unsorted_and_duplicates() {
        assert_eq!(
            Sequence::new(vec![1, 3, 2]),
            Err(SequenceError::NotStrictlyAscending { index: 2 })
        );
        assert_eq!(
            Sequence::new(vec![4, 4]),
            Err(SequenceError::NotStrictlyAscending { index: 1 })
        );
    }

    #[test]
    fn new_accepts_empty_and_single() {
        assert!(Sequence::new(vec![]).unwrap().is_empty());
        assert_eq!(Sequence::new(vec![42]).unwrap().len(), 1);
    }

    #[test]
    fn contains_uses_membership() {
        let seq = Sequence::new(vec![2, 3, 5, 7, 11]).unwrap();
        assert!(seq.contains(7));
        assert!(!seq.contains(4));
    }

    #[test]
    fn between_respects_exclusive_bounds() {
        let seq = Sequence::one_to(10).unwrap();
        assert_eq!(seq.between(None, None).len(), 10);
        assert_eq!(seq.between(Some(3), None), &[4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(seq.between(None, Some(3)), &[1, 2]);
        assert_eq!(seq.between(Some(3), Some(6)), &[4, 5]);
        assert!(seq.between(Some(5), Some(6)).is_empty());
        assert!(seq.between(Some(8), Some(2)).is_empty());
    }

    #[test]
    fn display_summarizes() {
        let seq = Sequence::one_to(100).unwrap();
        assert_eq!(format!("{seq}"), "[1..100] (100 values)");
        assert_eq!(format!("{}", Sequence::new(vec![]).unwrap()), "[]");
    }
}
