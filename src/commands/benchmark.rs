//! Benchmark command
//!
//! Plays every secret in `1..=N` with one strategy and aggregates the
//! attempt counts. Games are independent, so they run in parallel.

use crate::core::{Sequence, SequenceError};
use crate::game::{Session, Strategy, StrategyType, play};
use crate::search::{binary_search, worst_case_attempts};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub strategy: String,
    pub total_games: usize,
    pub solved: usize,
    pub total_attempts: usize,
    pub average_attempts: f64,
    pub min_attempts: usize,
    pub max_attempts: usize,
    pub distribution: FxHashMap<usize, usize>,
    /// Games that took exactly as many attempts as the binary-search oracle
    pub oracle_matches: usize,
    pub worst_case_bound: usize,
    pub duration: Duration,
    pub games_per_second: f64,
}

struct GameStats {
    attempts: usize,
    solved: bool,
    matches_oracle: bool,
}

/// Play every secret in `1..=max_number`
///
/// Each game gets its own strategy, seeded from `seed` and the secret, so
/// results do not depend on scheduling.
///
/// # Errors
///
/// Returns `SequenceError` if `max_number < 1`.
pub fn run_benchmark(
    strategy_name: &str,
    max_number: i64,
    seed: u64,
    show_progress: bool,
) -> Result<BenchmarkResult, SequenceError> {
    let candidates = Sequence::one_to(max_number)?;
    let max_attempts = candidates.len();

    let pb = if show_progress {
        ProgressBar::new(max_attempts as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb.set_message(strategy_name.to_string());

    let start = Instant::now();
    let games: Vec<GameStats> = candidates
        .as_slice()
        .par_iter()
        .map(|&secret| {
            let mut strategy = StrategyType::from_name(strategy_name, seed ^ secret.unsigned_abs());
            let stats = Session::with_secret(candidates.clone(), secret).map_or(
                GameStats {
                    attempts: 0,
                    solved: false,
                    matches_oracle: false,
                },
                |session| {
                    let outcome = play(session, &mut strategy, max_attempts);
                    let oracle = binary_search(candidates.as_slice(), secret);
                    GameStats {
                        attempts: outcome.attempts(),
                        solved: outcome.solved,
                        matches_oracle: outcome.attempts() == oracle.attempts,
                    }
                },
            );
            pb.inc(1);
            stats
        })
        .collect();
    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();
    for game in games.iter().filter(|g| g.solved) {
        *distribution.entry(game.attempts).or_insert(0) += 1;
    }

    let solved: Vec<usize> = games.iter().filter(|g| g.solved).map(|g| g.attempts).collect();
    let total_attempts: usize = solved.iter().sum();
    let total_games = games.len();

    Ok(BenchmarkResult {
        strategy: StrategyType::from_name(strategy_name, seed).name().to_string(),
        total_games,
        solved: solved.len(),
        total_attempts,
        average_attempts: if solved.is_empty() {
            0.0
        } else {
            total_attempts as f64 / solved.len() as f64
        },
        min_attempts: solved.iter().copied().min().unwrap_or(0),
        max_attempts: solved.iter().copied().max().unwrap_or(0),
        distribution,
        oracle_matches: games.iter().filter(|g| g.matches_oracle).count(),
        worst_case_bound: worst_case_attempts(total_games),
        duration,
        games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
