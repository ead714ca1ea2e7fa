//! Computer-opponent command
//!
//! Lets one strategy play a single game and returns the guess path.

use crate::core::Sequence;
use crate::game::{PlayOutcome, Session, SessionError, Strategy, StrategyType, play};
use crate::search::worst_case_attempts;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Configuration for an automated game
pub struct AutoConfig {
    pub max_number: i64,
    /// Secret to play against; drawn from `seed` when `None`
    pub secret: Option<i64>,
    pub seed: u64,
    pub strategy: String,
}

impl AutoConfig {
    #[must_use]
    pub const fn new(max_number: i64, strategy: String) -> Self {
        Self {
            max_number,
            secret: None,
            seed: 1,
            strategy,
        }
    }
}

/// Result of an automated game
pub struct AutoResult {
    pub strategy: &'static str,
    pub outcome: PlayOutcome,
    /// Attempts binary search needs in the worst case over the same range
    pub worst_case: usize,
    pub duration: Duration,
}

/// Play one game with the configured strategy
///
/// # Errors
///
/// Returns `SessionError` if the range is empty or the secret is outside it.
pub fn run_auto(config: &AutoConfig) -> Result<AutoResult, SessionError> {
    let candidates = Sequence::one_to(config.max_number)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let secret = match config.secret {
        Some(secret) => secret,
        None => candidates.as_slice()[rng.random_range(0..candidates.len())],
    };
    let session = Session::with_secret(candidates, secret)?;

    let mut strategy = StrategyType::from_name(&config.strategy, rng.random());
    let max_attempts = session.candidates().len();
    let worst_case = worst_case_attempts(max_attempts);

    let start = Instant::now();
    let outcome = play(session, &mut strategy, max_attempts);

    Ok(AutoResult {
        strategy: strategy.name(),
        outcome,
        worst_case,
        duration: start.elapsed(),
    })
}
