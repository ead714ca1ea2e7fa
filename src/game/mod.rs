//! Number-guessing game
//!
//! Session state and its pure transition function, the computer opponents,
//! the loop that lets an opponent play, and the alert surface the
//! interactive game talks to.

mod player;
mod session;
pub mod strategy;
mod surface;

pub use player::{PlayOutcome, Turn, play};
pub use session::{
    Feedback, GameConfig, GuessError, Session, SessionError, apply_guess, process_guess,
};
pub use strategy::{BisectionStrategy, LinearStrategy, RandomStrategy, Strategy, StrategyType};
pub use surface::{AlertSurface, Severity, TerminalSurface};
