//! Display/alert surface
//!
//! The game never prints directly. It hands titled messages to an
//! `AlertSurface` and asks it for lines of input, so the same loop can run
//! against a terminal or a scripted test double.

use colored::Colorize;
use std::io::{self, BufRead, Write};

/// How a message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Somewhere to show messages and read single lines of text
pub trait AlertSurface {
    /// Present a message and return once it has been shown
    ///
    /// # Errors
    /// Returns an I/O error if the message cannot be written.
    fn alert(&mut self, severity: Severity, title: &str, message: &str) -> io::Result<()>;

    /// Read one line of input, without the trailing newline
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    /// Returns an I/O error if reading or prompting fails.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Line-oriented surface over any reader/writer pair
pub struct TerminalSurface<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the surface and return the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalSurface<io::StdinLock<'static>, io::Stdout> {
    /// Surface over the process's stdin and stdout
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> AlertSurface for TerminalSurface<R, W> {
    fn alert(&mut self, severity: Severity, title: &str, message: &str) -> io::Result<()> {
        let title = match severity {
            Severity::Info => title.bright_cyan().bold(),
            Severity::Error => title.bright_red().bold(),
        };
        writeln!(self.output, "{title}: {message}")?;
        self.output.flush()
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
