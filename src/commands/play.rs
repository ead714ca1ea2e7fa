//! Interactive game loop
//!
//! Reads guesses from an `AlertSurface`, runs each through the session's
//! pure transition and shows the feedback on the same surface.

use crate::game::{AlertSurface, Feedback, Session, Severity, process_guess};
use std::io;

/// How an interactive game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaySummary {
    pub secret: i64,
    /// Valid guesses made
    pub attempts: usize,
    /// Lines rejected as not an integer
    pub invalid_inputs: usize,
    pub solved: bool,
    /// The player quit or the input ended before the game was over
    pub abandoned: bool,
}

/// Play one game on `surface`
///
/// Typing `quit` or closing the input abandons the game.
///
/// # Errors
///
/// Returns an I/O error if the surface cannot be read or written.
pub fn run_play<A: AlertSurface + ?Sized>(
    surface: &mut A,
    session: Session,
    max_attempts: usize,
) -> io::Result<PlaySummary> {
    let (low, high) = match (session.candidates().first(), session.candidates().last()) {
        (Some(low), Some(high)) => (low, high),
        _ => (0, 0),
    };
    surface.alert(
        Severity::Info,
        "Guess the number",
        &format!("I picked a number between {low} and {high}"),
    )?;

    let secret = session.secret();
    let mut state = session;
    let mut invalid_inputs = 0;
    let mut abandoned = false;

    while !state.is_solved() {
        if state.attempts() >= max_attempts {
            surface.alert(
                Severity::Error,
                "Game over",
                &format!("Out of attempts, the number was {secret}"),
            )?;
            break;
        }

        let Some(line) = surface.read_line("Your guess")? else {
            abandoned = true;
            break;
        };
        if matches!(line.trim(), "quit" | "q" | "exit") {
            surface.alert(Severity::Info, "Bye", &format!("The number was {secret}"))?;
            abandoned = true;
            break;
        }

        let (next, feedback) = process_guess(state, &line);
        state = next;
        if matches!(feedback, Feedback::Invalid(_)) {
            invalid_inputs += 1;
        }
        surface.alert(feedback.severity(), feedback.title(), &feedback.to_string())?;
    }

    Ok(PlaySummary {
        secret,
        attempts: state.attempts(),
        invalid_inputs,
        solved: state.is_solved(),
        abandoned,
    })
}
