//! Solver interface
//!
//! `LpSolver` is the seam between formulations and the engine that solves
//! them. Options, solutions and errors are backend-neutral; see
//! [`HighsSolver`](super::HighsSolver) for the shipped implementation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::model::{ConstraintId, Model, VarId};

/// Why a solve produced no optimum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    Infeasible,
    Unbounded,
    TimeLimit,
    Interrupted,
    /// Any other failure reported by the backend
    Backend(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible => write!(f, "problem is infeasible"),
            Self::Unbounded => write!(f, "problem is unbounded"),
            Self::TimeLimit => write!(f, "time limit reached"),
            Self::Interrupted => write!(f, "solve was interrupted"),
            Self::Backend(message) => write!(f, "solver failed: {message}"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Time limit and cancellation for a solve
///
/// The default blocks until optimal.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub time_limit: Option<Duration>,
    /// Setting the flag makes the next solve (or the running one, once it
    /// returns) fail with `Interrupted`
    pub interrupt: Option<Arc<AtomicBool>>,
}

impl SolveOptions {
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }
}

/// Running limits of one solve call
pub(crate) struct Budget {
    deadline: Option<Instant>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub(crate) fn new(options: &SolveOptions) -> Self {
        Self {
            deadline: options.time_limit.map(|limit| Instant::now() + limit),
            interrupt: options.interrupt.clone(),
        }
    }

    /// Fail if interrupted or out of time
    pub(crate) fn check(&self) -> Result<(), SolveError> {
        if self
            .interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Err(SolveError::Interrupted);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(SolveError::TimeLimit);
        }
        Ok(())
    }

    /// Time left before the deadline, if there is one
    pub(crate) fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

/// Optimal solution of a model
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
    objective: f64,
    duals: Option<Vec<f64>>,
}

impl Solution {
    pub(crate) const fn new(values: Vec<f64>, objective: f64, duals: Option<Vec<f64>>) -> Self {
        Self {
            values,
            objective,
            duals,
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Dual price of a constraint: the change of a minimized objective per
    /// unit increase of its right-hand side
    ///
    /// Only available for pure LPs.
    #[must_use]
    pub fn dual(&self, constraint: ConstraintId) -> Option<f64> {
        self.duals
            .as_ref()
            .and_then(|duals| duals.get(constraint.index()).copied())
    }

    #[must_use]
    pub fn duals(&self) -> Option<&[f64]> {
        self.duals.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn objective(&self) -> f64 {
        self.objective
    }
}

/// Anything that can solve a `Model` to optimality
pub trait LpSolver {
    /// # Errors
    ///
    /// Returns a `SolveError` when the model has no optimum or a limit stops
    /// the solve.
    fn solve(&self, model: &Model) -> Result<Solution, SolveError>;
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        (**self).solve(model)
    }
}
