//! Column-generation driver
//!
//! Alternates between the relaxed master and the pricing knapsack until no
//! pattern with negative reduced cost exists, then optionally resolves the
//! master over the final pool with integer usage.
//!
//! The master is rebuilt from the pool on every iteration. Patterns are only
//! ever appended, so the pool grows by exactly one per improving iteration.

use std::fmt;

use super::master::{DemandMode, MasterSolution, solve_master};
use super::pricing::{Pricer, PricingSolution};
use crate::core::{Instance, Pattern, PatternPool};
use crate::lp::{LpSolver, SolveError};

/// Patterns the pool starts with
///
/// `MaxFill` is the classic seeding, but with `DemandMode::Exact` its rows
/// can leave the integer master without an exact combination (three items
/// of widths 10, 20 and 30 and five pieces each on a roll of 100 is one
/// such case). `Unit` always contains an exact plan, so it is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPatterns {
    /// One piece of item `i` in pattern `i`
    #[default]
    Unit,
    /// As many pieces of item `i` as fit in pattern `i`
    MaxFill,
}

impl SeedPatterns {
    /// Create from name string, defaulting to `Unit`
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "max-fill" | "maxfill" => Self::MaxFill,
            _ => Self::Unit,
        }
    }

    #[must_use]
    pub fn pool(self, instance: &Instance) -> PatternPool {
        match self {
            Self::Unit => PatternPool::unit_diagonal(instance),
            Self::MaxFill => PatternPool::max_fill_diagonal(instance),
        }
    }
}

/// Column generation configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGenerationConfig {
    /// A pattern is added only if its reduced cost is below `-tolerance`
    pub tolerance: f64,
    /// Relaxed solves allowed before giving up; `None` runs to convergence
    pub max_iterations: Option<usize>,
    pub seed: SeedPatterns,
    pub demand: DemandMode,
    /// Solve the integer master over the final pool
    pub integer_resolve: bool,
}

impl ColumnGenerationConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: None,
            seed: SeedPatterns::Unit,
            demand: DemandMode::Exact,
            integer_resolve: true,
        }
    }
}

impl Default for ColumnGenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Stage of the loop, used to attribute failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Relaxed,
    Pricing,
    Integer,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relaxed => write!(f, "relaxed master"),
            Self::Pricing => write!(f, "pricing"),
            Self::Integer => write!(f, "integer master"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnGenerationError {
    /// A solver call in `phase` did not reach an optimum
    Solve { phase: Phase, source: SolveError },
    /// The relaxed solver returned no dual prices
    MissingDuals,
    /// Still improving after the configured number of iterations
    IterationLimit(usize),
}

impl fmt::Display for ColumnGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solve { phase, source } => write!(f, "{phase} failed: {source}"),
            Self::MissingDuals => write!(f, "relaxed master returned no dual prices"),
            Self::IterationLimit(n) => write!(f, "no convergence after {n} iterations"),
        }
    }
}

impl std::error::Error for ColumnGenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Solve { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn in_phase(phase: Phase) -> impl Fn(SolveError) -> ColumnGenerationError {
    move |source| ColumnGenerationError::Solve { phase, source }
}

/// One relaxed solve followed by one pricing round
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 1-based
    pub iteration: usize,
    pub relaxed_objective: f64,
    pub duals: Vec<f64>,
    pub pattern: Pattern,
    /// Dual-weighted value of `pattern`
    pub pricing_value: f64,
    /// Smallest reduced cost over all patterns at this iteration's prices
    pub reduced_cost: f64,
    /// Highest per-iteration minimum reduced cost so far; never decreases
    /// and reaches `-tolerance` or above once the run converges
    pub min_reduced_cost: f64,
    /// Whether `pattern` entered the pool
    pub added: bool,
    /// Pool size after this iteration
    pub pool_size: usize,
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct ColumnGenerationReport {
    pub pool: PatternPool,
    pub iterations: Vec<IterationRecord>,
    /// Relaxed master at convergence
    pub relaxed: MasterSolution,
    /// Integer master over the final pool, if requested
    pub integer: Option<MasterSolution>,
}

impl ColumnGenerationReport {
    #[must_use]
    pub fn relaxed_objective(&self) -> f64 {
        self.relaxed.objective
    }

    /// Rolls needed by any integer plan, from the relaxed bound
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        (self.relaxed.objective - 1e-6).ceil()
    }

    #[must_use]
    pub fn integer_objective(&self) -> Option<f64> {
        self.integer.as_ref().map(|s| s.objective)
    }

    #[must_use]
    pub fn patterns_added(&self) -> usize {
        self.iterations.iter().filter(|r| r.added).count()
    }

    /// Final dual prices
    #[must_use]
    pub fn duals(&self) -> &[f64] {
        self.relaxed.duals.as_deref().unwrap_or_default()
    }

    /// Pieces of each item cut by the integer plan
    #[must_use]
    pub fn coverage(&self, instance: &Instance) -> Option<Vec<f64>> {
        self.integer
            .as_ref()
            .map(|plan| plan.coverage(instance, &self.pool))
    }
}

/// Column generation over one instance
///
/// # Examples
/// ```
/// use mip_katas::core::Instance;
/// use mip_katas::cutting::{ColumnGeneration, ColumnGenerationConfig, KnapsackPricer};
/// use mip_katas::lp::HighsSolver;
///
/// let instance = Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap();
/// let solver = HighsSolver::default();
/// let report = ColumnGeneration::new(&instance, &solver, &KnapsackPricer, ColumnGenerationConfig::default())
///     .run()
///     .unwrap();
///
/// assert!((report.relaxed_objective() - 3.0).abs() < 1e-6);
/// ```
pub struct ColumnGeneration<'a, S: ?Sized, P: ?Sized> {
    instance: &'a Instance,
    solver: &'a S,
    pricer: &'a P,
    config: ColumnGenerationConfig,
}

impl<'a, S, P> ColumnGeneration<'a, S, P>
where
    S: LpSolver + ?Sized,
    P: Pricer + ?Sized,
{
    #[must_use]
    pub const fn new(instance: &'a Instance, solver: &'a S, pricer: &'a P, config: ColumnGenerationConfig) -> Self {
        Self {
            instance,
            solver,
            pricer,
            config,
        }
    }

    /// Run to convergence
    ///
    /// # Errors
    ///
    /// Returns `ColumnGenerationError` if any solve fails or the iteration
    /// limit is hit.
    pub fn run(&self) -> Result<ColumnGenerationReport, ColumnGenerationError> {
        self.run_with(|_| {})
    }

    /// Run to convergence, handing every iteration to `observer` as it completes
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with<F>(&self, mut observer: F) -> Result<ColumnGenerationReport, ColumnGenerationError>
    where
        F: FnMut(&IterationRecord),
    {
        let mut pool = self.config.seed.pool(self.instance);
        let mut iterations = Vec::new();
        let mut min_reduced_cost = f64::NEG_INFINITY;

        let relaxed = loop {
            let relaxed = solve_master(self.solver, self.instance, &pool, self.config.demand, false)
                .map_err(in_phase(Phase::Relaxed))?;
            let duals = relaxed.duals.clone().ok_or(ColumnGenerationError::MissingDuals)?;

            let PricingSolution { pattern, value } = self
                .pricer
                .price(self.instance, &duals)
                .map_err(in_phase(Phase::Pricing))?;
            let reduced_cost = 1.0 - value;
            min_reduced_cost = min_reduced_cost.max(reduced_cost);
            let added = reduced_cost < -self.config.tolerance;
            if added {
                pool.push(pattern.clone());
            }

            let record = IterationRecord {
                iteration: iterations.len() + 1,
                relaxed_objective: relaxed.objective,
                duals,
                pattern,
                pricing_value: value,
                reduced_cost,
                min_reduced_cost,
                added,
                pool_size: pool.len(),
            };
            observer(&record);
            iterations.push(record);

            if !added {
                break relaxed;
            }
            if let Some(limit) = self.config.max_iterations
                && iterations.len() >= limit
            {
                return Err(ColumnGenerationError::IterationLimit(limit));
            }
        };

        let integer = if self.config.integer_resolve {
            Some(
                solve_master(self.solver, self.instance, &pool, self.config.demand, true)
                    .map_err(in_phase(Phase::Integer))?,
            )
        } else {
            None
        };

        Ok(ColumnGenerationReport {
            pool,
            iterations,
            relaxed,
            integer,
        })
    }
}
