//! Cutting patterns and the append-only pattern pool
//!
//! A pattern records how many pieces of each item type are cut from a single
//! roll. `pattern[i] * width[i]` summed over all items never exceeds the roll
//! width for a feasible pattern.

use super::Instance;
use std::fmt;

/// Per-item piece counts for one roll
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(Vec<u32>);

impl Pattern {
    #[inline]
    #[must_use]
    pub const fn new(counts: Vec<u32>) -> Self {
        Self(counts)
    }

    /// One piece of item `index`, nothing else
    #[must_use]
    pub fn unit(item_count: usize, index: usize) -> Self {
        let mut counts = vec![0; item_count];
        counts[index] = 1;
        Self(counts)
    }

    /// As many pieces of item `index` as fit on one roll, nothing else
    #[must_use]
    pub fn max_fill(instance: &Instance, index: usize) -> Self {
        let mut counts = vec![0; instance.len()];
        counts[index] = instance.max_pieces(index);
        Self(counts)
    }

    #[inline]
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    /// Pieces of item `index` in this pattern
    #[inline]
    #[must_use]
    pub fn count(&self, index: usize) -> u32 {
        self.0[index]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Total width consumed on the roll
    #[must_use]
    pub fn used_width(&self, instance: &Instance) -> u64 {
        self.0
            .iter()
            .zip(instance.widths())
            .map(|(&count, width)| u64::from(count) * u64::from(width))
            .sum()
    }

    /// Whether the pattern has one entry per item and fits on the roll
    #[must_use]
    pub fn fits(&self, instance: &Instance) -> bool {
        self.0.len() == instance.len() && self.used_width(instance) <= u64::from(instance.roll_width())
    }

    /// Width left over on the roll
    #[must_use]
    pub fn waste(&self, instance: &Instance) -> u64 {
        u64::from(instance.roll_width()).saturating_sub(self.used_width(instance))
    }

    /// Sum of `prices[i] * pattern[i]`
    #[must_use]
    pub fn value(&self, prices: &[f64]) -> f64 {
        self.0
            .iter()
            .zip(prices)
            .map(|(&count, &price)| f64::from(count) * price)
            .sum()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, count) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{count}")?;
        }
        write!(f, "]")
    }
}

/// Ordered, append-only collection of patterns
///
/// Patterns are never removed or modified once pushed, so a pattern's index
/// stays valid for the lifetime of the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternPool {
    patterns: Vec<Pattern>,
}

impl PatternPool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The diagonal basis with one piece of each item per pattern
    #[must_use]
    pub fn unit_diagonal(instance: &Instance) -> Self {
        Self {
            patterns: (0..instance.len())
                .map(|i| Pattern::unit(instance.len(), i))
                .collect(),
        }
    }

    /// The diagonal basis with each roll filled by a single item type
    #[must_use]
    pub fn max_fill_diagonal(instance: &Instance) -> Self {
        Self {
            patterns: (0..instance.len())
                .map(|i| Pattern::max_fill(instance, i))
                .collect(),
        }
    }

    /// Append a pattern and return its index
    pub fn push(&mut self, pattern: Pattern) -> usize {
        self.patterns.push(pattern);
        self.patterns.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Pieces of each item produced when pattern `p` is cut `usage[p]` times
    #[must_use]
    pub fn coverage(&self, item_count: usize, usage: &[f64]) -> Vec<f64> {
        let mut covered = vec![0.0; item_count];
        for (pattern, &times) in self.patterns.iter().zip(usage) {
            for (slot, &count) in covered.iter_mut().zip(pattern.counts()) {
                *slot += f64::from(count) * times;
            }
        }
        covered
    }
}

impl<'a> IntoIterator for &'a PatternPool {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
