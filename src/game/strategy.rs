//! Guess selection strategies
//!
//! Defines the Strategy trait and the computer opponents that implement it.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// A strategy for picking the next guess
pub trait Strategy {
    /// Pick a guess from the candidates still consistent with the hints
    ///
    /// Returns `None` if the window is empty.
    fn next_guess(&mut self, window: &[i64]) -> Option<i64>;

    /// Short name used on the command line and in reports
    fn name(&self) -> &'static str;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// Binary search over the window (default, optimal worst case)
    Bisection(BisectionStrategy),
    /// Uniformly random candidate
    Random(RandomStrategy),
    /// Smallest remaining candidate
    Linear(LinearStrategy),
}

impl Strategy for StrategyType {
    fn next_guess(&mut self, window: &[i64]) -> Option<i64> {
        match self {
            Self::Bisection(s) => s.next_guess(window),
            Self::Random(s) => s.next_guess(window),
            Self::Linear(s) => s.next_guess(window),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Bisection(s) => s.name(),
            Self::Random(s) => s.name(),
            Self::Linear(s) => s.name(),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "bisection" (or "binary"), "random", "linear".
    /// Defaults to bisection if name is unrecognized. `seed` is only used by
    /// the random strategy.
    #[must_use]
    pub fn from_name(name: &str, seed: u64) -> Self {
        match name {
            "random" => Self::Random(RandomStrategy::new(seed)),
            "linear" => Self::Linear(LinearStrategy),
            _ => Self::Bisection(BisectionStrategy),
        }
    }
}

/// Binary-search opponent
///
/// Always guesses the lower middle of the window, which is exactly the probe
/// the binary-search oracle makes on the same range.
pub struct BisectionStrategy;

impl Strategy for BisectionStrategy {
    fn next_guess(&mut self, window: &[i64]) -> Option<i64> {
        if window.is_empty() {
            return None;
        }
        Some(window[(window.len() - 1) / 2])
    }

    fn name(&self) -> &'static str {
        "bisection"
    }
}

/// Random opponent
///
/// Picks uniformly from the window using its own seeded generator.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn next_guess(&mut self, window: &[i64]) -> Option<i64> {
        window.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Linear-scan opponent
///
/// Counts up from the smallest candidate. Useful as a worst-case baseline.
pub struct LinearStrategy;

impl Strategy for LinearStrategy {
    fn next_guess(&mut self, window: &[i64]) -> Option<i64> {
        window.first().copied()
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisection_picks_lower_middle() {
        let mut strategy = BisectionStrategy;
        assert_eq!(strategy.next_guess(&[1, 2, 3, 4, 5]), Some(3));
        assert_eq!(strategy.next_guess(&[1, 2, 3, 4]), Some(2));
        assert_eq!(strategy.next_guess(&[7]), Some(7));
        assert_eq!(strategy.next_guess(&[]), None);
    }

    #[test]
    fn random_stays_in_window_and_is_seeded() {
        let window: Vec<i64> = (10..20).collect();
        let mut a = RandomStrategy::new(3);
        let mut b = RandomStrategy::new(3);
        for _ in 0..50 {
            let guess = a.next_guess(&window);
            assert!(guess.is_some_and(|g| window.contains(&g)));
            assert_eq!(guess, b.next_guess(&window));
        }
        assert_eq!(a.next_guess(&[]), None);
    }

    #[test]
    fn linear_picks_smallest() {
        let mut strategy = LinearStrategy;
        assert_eq!(strategy.next_guess(&[4, 5, 6]), Some(4));
        assert_eq!(strategy.next_guess(&[]), None);
    }

    #[test]
    fn from_name_selects_strategy() {
        assert_eq!(StrategyType::from_name("random", 1).name(), "random");
        assert_eq!(StrategyType::from_name("linear", 1).name(), "linear");
        assert_eq!(StrategyType::from_name("bisection", 1).name(), "bisection");
        assert_eq!(StrategyType::from_name("whatever", 1).name(), "bisection");
    }
}
