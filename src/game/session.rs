//! Guessing-game session state
//!
//! A `Session` holds everything the game needs between guesses: the secret,
//! the candidate numbers, the attempt counter and the tightest bounds the
//! feedback has revealed so far. `process_guess` is a pure transition from
//! one state to the next; it knows nothing about how the feedback is shown.

use super::surface::Severity;
use crate::core::{Sequence, SequenceError};
use rand::Rng;
use std::fmt;

/// Game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Secrets are drawn from `1..=max_number`
    pub max_number: i64,
    /// Seed for the secret; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Give up after this many valid guesses
    pub max_attempts: usize,
}

impl GameConfig {
    #[must_use]
    pub const fn new(max_number: i64) -> Self {
        Self {
            max_number,
            seed: None,
            max_attempts: 1_000,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Why a guess was rejected without counting as an attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// The input is not an integer
    InvalidFormat(String),
    /// The secret has already been found
    GameOver,
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(input) => write!(f, "Must be an integer, got '{input}'"),
            Self::GameOver => write!(f, "The number has already been guessed"),
        }
    }
}

impl std::error::Error for GuessError {}

/// Error type for sessions that cannot be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Sequence(SequenceError),
    NoCandidates,
    SecretNotCandidate(i64),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(e) => write!(f, "Invalid candidates: {e}"),
            Self::NoCandidates => write!(f, "There are no candidate numbers"),
            Self::SecretNotCandidate(secret) => {
                write!(f, "Secret {secret} is not one of the candidates")
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SequenceError> for SessionError {
    fn from(e: SequenceError) -> Self {
        Self::Sequence(e)
    }
}

/// Response to one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The guess was the secret
    Correct { attempts: usize },
    /// The secret is greater than the guess
    Higher { guess: i64, lower_bound: i64 },
    /// The secret is smaller than the guess
    Lower { guess: i64, upper_bound: i64 },
    /// The guess was rejected
    Invalid(GuessError),
}

impl Feedback {
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Invalid(_) => Severity::Error,
            _ => Severity::Info,
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Correct { .. } => "Victory",
            Self::Higher { .. } | Self::Lower { .. } => "Hint",
            Self::Invalid(GuessError::InvalidFormat(_)) => "Invalid input",
            Self::Invalid(GuessError::GameOver) => "Game over",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct { attempts } => {
                let noun = if *attempts == 1 { "attempt" } else { "attempts" };
                write!(f, "You guessed the number in {attempts} {noun}")
            }
            Self::Higher { guess, lower_bound } => write!(
                f,
                "The secret number is greater than {guess} (lower bound = {lower_bound})"
            ),
            Self::Lower { guess, upper_bound } => write!(
                f,
                "The secret number is smaller than {guess} (upper bound = {upper_bound})"
            ),
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

/// State of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    candidates: Sequence,
    secret: i64,
    attempts: usize,
    lower_bound: Option<i64>,
    upper_bound: Option<i64>,
    solved: bool,
}

impl Session {
    /// Start a game over `1..=config.max_number` with a secret drawn from `rng`
    ///
    /// # Errors
    /// Returns `SessionError` if `max_number < 1`.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, SessionError> {
        let candidates = Sequence::one_to(config.max_number)?;
        let index = rng.random_range(0..candidates.len());
        let secret = candidates.as_slice()[index];
        Self::with_secret(candidates, secret)
    }

    /// Start a game with a known secret
    ///
    /// # Errors
    /// Returns `SessionError` if the candidates are empty or do not contain
    /// the secret.
    ///
    /// # Examples
    /// ```
    /// use mip_katas::core::Sequence;
    /// use mip_katas::game::{Feedback, Session, process_guess};
    ///
    /// let session = Session::with_secret(Sequence::one_to(100).unwrap(), 42).unwrap();
    /// let (session, feedback) = process_guess(session, "50");
    /// assert!(matches!(feedback, Feedback::Lower { guess: 50, .. }));
    ///
    /// let (session, feedback) = process_guess(session, "forty-two");
    /// assert!(matches!(feedback, Feedback::Invalid(_)));
    /// assert_eq!(session.attempts(), 1);
    ///
    /// let (_, feedback) = process_guess(session, "42");
    /// assert_eq!(feedback, Feedback::Correct { attempts: 2 });
    /// ```
    pub fn with_secret(candidates: Sequence, secret: i64) -> Result<Self, SessionError> {
        if candidates.is_empty() {
            return Err(SessionError::NoCandidates);
        }
        if !candidates.contains(secret) {
            return Err(SessionError::SecretNotCandidate(secret));
        }
        Ok(Self {
            candidates,
            secret,
            attempts: 0,
            lower_bound: None,
            upper_bound: None,
            solved: false,
        })
    }

    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    #[inline]
    #[must_use]
    pub const fn lower_bound(&self) -> Option<i64> {
        self.lower_bound
    }

    #[inline]
    #[must_use]
    pub const fn upper_bound(&self) -> Option<i64> {
        self.upper_bound
    }

    #[inline]
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    #[inline]
    #[must_use]
    pub const fn candidates(&self) -> &Sequence {
        &self.candidates
    }

    /// The secret; players should only ever look at [`Session::window`]
    #[inline]
    #[must_use]
    pub const fn secret(&self) -> i64 {
        self.secret
    }

    /// Candidates still consistent with every hint so far
    #[must_use]
    pub fn window(&self) -> &[i64] {
        if self.solved {
            return &[];
        }
        self.candidates.between(self.lower_bound, self.upper_bound)
    }
}

/// Apply one line of user input to a session
///
/// Input that does not parse as an integer is rejected with
/// `GuessError::InvalidFormat` and does not count as an attempt.
#[must_use]
pub fn process_guess(state: Session, input: &str) -> (Session, Feedback) {
    if state.solved {
        return (state, Feedback::Invalid(GuessError::GameOver));
    }

    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(guess) => apply_guess(state, guess),
        Err(_) => (
            state,
            Feedback::Invalid(GuessError::InvalidFormat(trimmed.to_string())),
        ),
    }
}

/// Apply an already-parsed guess to a session
#[must_use]
pub fn apply_guess(mut state: Session, guess: i64) -> (Session, Feedback) {
    if state.solved {
        return (state, Feedback::Invalid(GuessError::GameOver));
    }

    state.attempts += 1;

    let feedback = match guess.cmp(&state.secret) {
        std::cmp::Ordering::Equal => {
            state.solved = true;
            Feedback::Correct {
                attempts: state.attempts,
            }
        }
        std::cmp::Ordering::Less => {
            let lower_bound = state.lower_bound.map_or(guess, |lo| lo.max(guess));
            state.lower_bound = Some(lower_bound);
            Feedback::Higher { guess, lower_bound }
        }
        std::cmp::Ordering::Greater => {
            let upper_bound = state.upper_bound.map_or(guess, |hi| hi.min(guess));
            state.upper_bound = Some(upper_bound);
            Feedback::Lower { guess, upper_bound }
        }
    };

    (state, feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(secret: i64) -> Session {
        Session::with_secret(Sequence::one_to(100).unwrap(), secret).unwrap()
    }

    #[test]
    fn new_session_draws_reproducible_secret() {
        let config = GameConfig::default();
        let a = Session::new(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = Session::new(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a.secret(), b.secret());
        assert!((1..=100).contains(&a.secret()));
        assert_eq!(a.attempts(), 0);
        assert!(!a.is_solved());
    }

    #[test]
    fn new_session_rejects_empty_range() {
        let config = GameConfig::new(0);
        assert!(matches!(
            Session::new(&config, &mut StdRng::seed_from_u64(1)),
            Err(SessionError::Sequence(_))
        ));
    }

    #[test]
    fn with_secret_requires_membership() {
        assert_eq!(
            Session::with_secret(Sequence::one_to(10).unwrap(), 11),
            Err(SessionError::SecretNotCandidate(11))
        );
        assert_eq!(
            Session::with_secret(Sequence::new(vec![]).unwrap(), 1),
            Err(SessionError::NoCandidates)
        );
    }

    #[test]
    fn low_guess_raises_lower_bound() {
        let (state, feedback) = process_guess(session(70), "40");
        assert_eq!(
            feedback,
            Feedback::Higher {
                guess: 40,
                lower_bound: 40
            }
        );
        assert_eq!(state.lower_bound(), Some(40));
        assert_eq!(state.upper_bound(), None);
        assert_eq!(state.attempts(), 1);
    }

    #[test]
    fn high_guess_lowers_upper_bound() {
        let (state, feedback) = process_guess(session(70), " 90 ");
        assert_eq!(
            feedback,
            Feedback::Lower {
                guess: 90,
                upper_bound: 90
            }
        );
        assert_eq!(state.upper_bound(), Some(90));
    }

    #[test]
    fn bounds_only_tighten() {
        let state = session(70);
        let (state, _) = process_guess(state, "60");
        let (state, feedback) = process_guess(state, "20");
        assert_eq!(
            feedback,
            Feedback::Higher {
                guess: 20,
                lower_bound: 60
            }
        );
        let (state, _) = process_guess(state, "80");
        let (state, _) = process_guess(state, "95");
        assert_eq!(state.lower_bound(), Some(60));
        assert_eq!(state.upper_bound(), Some(80));
        assert_eq!(state.window().first(), Some(&61));
        assert_eq!(state.window().last(), Some(&79));
        assert_eq!(state.attempts(), 4);
    }

    #[test]
    fn invalid_input_does_not_count() {
        let (state, feedback) = process_guess(session(5), "abc");
        assert_eq!(
            feedback,
            Feedback::Invalid(GuessError::InvalidFormat("abc".to_string()))
        );
        assert_eq!(feedback.severity(), Severity::Error);
        assert_eq!(state.attempts(), 0);

        let (state, feedback) = process_guess(state, "4.5");
        assert!(matches!(feedback, Feedback::Invalid(_)));
        let (state, _) = process_guess(state, "");
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn correct_guess_finishes_game() {
        let (state, _) = process_guess(session(33), "50");
        let (state, feedback) = process_guess(state, "33");
        assert_eq!(feedback, Feedback::Correct { attempts: 2 });
        assert!(state.is_solved());
        assert!(state.window().is_empty());

        let (state, feedback) = process_guess(state, "33");
        assert_eq!(feedback, Feedback::Invalid(GuessError::GameOver));
        assert_eq!(state.attempts(), 2);
    }

    #[test]
    fn out_of_range_guess_still_counts() {
        let (state, feedback) = process_guess(session(1), "-5");
        assert!(matches!(feedback, Feedback::Higher { lower_bound: -5, .. }));
        assert_eq!(state.window().len(), 100);
        assert_eq!(state.attempts(), 1);
    }

    #[test]
    fn window_always_contains_secret() {
        let mut state = session(64);
        for guess in [10, 90, 50, 75, 63, 65] {
            state = apply_guess(state, guess).0;
            assert!(state.window().contains(&64));
        }
    }

    #[test]
    fn feedback_messages() {
        assert_eq!(
            Feedback::Correct { attempts: 1 }.to_string(),
            "You guessed the number in 1 attempt"
        );
        assert_eq!(
            Feedback::Correct { attempts: 7 }.to_string(),
            "You guessed the number in 7 attempts"
        );
        assert_eq!(Feedback::Correct { attempts: 7 }.title(), "Victory");
        assert_eq!(
            Feedback::Lower {
                guess: 9,
                upper_bound: 9
            }
            .title(),
            "Hint"
        );
    }
}
