//! Automated player
//!
//! Drives a session to completion with a strategy, feeding every guess
//! through the same pure transition a human player goes through.

use super::session::{Feedback, Session, apply_guess};
use super::strategy::Strategy;

/// One guess and the feedback it received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub guess: i64,
    pub feedback: Feedback,
    /// Candidates left before this guess
    pub window_before: usize,
}

/// Result of an automated game
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub secret: i64,
    pub turns: Vec<Turn>,
    pub solved: bool,
}

impl PlayOutcome {
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.turns.len()
    }
}

/// Let `strategy` play `session` until it wins, runs out of candidates or
/// reaches `max_attempts`
///
/// # Examples
/// ```
/// use mip_katas::core::Sequence;
/// use mip_katas::game::{BisectionStrategy, Session, play};
///
/// let session = Session::with_secret(Sequence::one_to(100).unwrap(), 37).unwrap();
/// let outcome = play(session, &mut BisectionStrategy, 100);
/// assert!(outcome.solved);
/// assert!(outcome.attempts() <= 7);
/// ```
pub fn play<S: Strategy + ?Sized>(session: Session, strategy: &mut S, max_attempts: usize) -> PlayOutcome {
    let secret = session.secret();
    let mut state = session;
    let mut turns = Vec::new();

    while !state.is_solved() && turns.len() < max_attempts {
        let window_before = state.window().len();
        let Some(guess) = strategy.next_guess(state.window()) else {
            break;
        };

        let (next, feedback) = apply_guess(state, guess);
        state = next;
        turns.push(Turn {
            guess,
            feedback,
            window_before,
        });
    }

    PlayOutcome {
        secret,
        turns,
        solved: state.is_solved(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sequence;
    use crate::game::strategy::{BisectionStrategy, LinearStrategy, RandomStrategy};
    use crate::search::{binary_search, worst_case_attempts};

    fn session(n: i64, secret: i64) -> Session {
        Session::with_secret(Sequence::one_to(n).unwrap(), secret).unwrap()
    }

    #[test]
    fn bisection_matches_oracle_attempts() {
        let seq = Sequence::one_to(100).unwrap();
        for secret in 1..=100 {
            let outcome = play(session(100, secret), &mut BisectionStrategy, 100);
            let oracle = binary_search(seq.as_slice(), secret);
            assert!(outcome.solved);
            assert_eq!(outcome.attempts(), oracle.attempts, "secret {secret}");
        }
    }

    #[test]
    fn bisection_never_exceeds_seven_for_hundred() {
        for secret in 1..=100 {
            let outcome = play(session(100, secret), &mut BisectionStrategy, 100);
            assert!(outcome.attempts() <= worst_case_attempts(100));
        }
        assert_eq!(worst_case_attempts(100), 7);
    }

    #[test]
    fn windows_shrink_every_turn() {
        let outcome = play(session(100, 1), &mut BisectionStrategy, 100);
        for pair in outcome.turns.windows(2) {
            assert!(pair[1].window_before < pair[0].window_before);
        }
        assert!(outcome.turns.last().is_some_and(|t| t.feedback.is_correct()));
    }

    #[test]
    fn linear_takes_secret_many_attempts() {
        let outcome = play(session(50, 23), &mut LinearStrategy, 100);
        assert!(outcome.solved);
        assert_eq!(outcome.attempts(), 23);
    }

    #[test]
    fn random_always_solves() {
        let mut strategy = RandomStrategy::new(11);
        for secret in [1, 50, 100] {
            let outcome = play(session(100, secret), &mut strategy, 100);
            assert!(outcome.solved);
            assert!(outcome.attempts() <= 100);
        }
    }

    #[test]
    fn attempt_cap_stops_play() {
        let outcome = play(session(100, 100), &mut LinearStrategy, 10);
        assert!(!outcome.solved);
        assert_eq!(outcome.attempts(), 10);
        assert_eq!(outcome.secret, 100);
    }
}
