//! Cutting-stock commands
//!
//! Resolve an instance (from a file or a seeded generator), then run column
//! generation or the compact model on it.

use crate::core::Instance;
use crate::cutting::{
    ColumnGeneration, ColumnGenerationConfig, ColumnGenerationError, ColumnGenerationReport,
    CompactSolution, KnapsackPricer, LoadError, ModelPricer, Pricer, load_from_file, solve_compact,
    trivial_roll_bound,
};
use crate::lp::{HighsSolver, SolveError, SolveOptions};
use crate::output::format_iteration;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Where the instance comes from
#[derive(Debug, Clone)]
pub struct InstanceSource {
    pub file: Option<PathBuf>,
    pub items: usize,
    pub roll_width: u32,
    pub seed: u64,
    /// Widths are drawn from `1..max_width`
    pub max_width: u32,
    /// Demands are drawn from `1..max_demand`
    pub max_demand: u32,
}

impl Default for InstanceSource {
    fn default() -> Self {
        Self {
            file: None,
            items: 5,
            roll_width: 100,
            seed: 1,
            max_width: 50,
            max_demand: 50,
        }
    }
}

impl InstanceSource {
    /// Load the file if one is given, otherwise generate
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be read or the instance is
    /// invalid.
    pub fn load(&self) -> Result<Instance, LoadError> {
        if let Some(path) = &self.file {
            return load_from_file(path);
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(Instance::random(
            &mut rng,
            self.items,
            self.roll_width,
            self.max_width,
            self.max_demand,
        )?)
    }
}

/// Pricing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricerKind {
    /// Knapsack model solved by the LP solver
    #[default]
    Model,
    /// Dynamic programming over the roll width
    Dp,
}

impl PricerKind {
    /// Create from name string, defaulting to `Model`
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "dp" | "dynamic" => Self::Dp,
            _ => Self::Model,
        }
    }
}

/// Configuration for the column-generation command
#[derive(Debug, Clone, Default)]
pub struct CutstockConfig {
    pub column_generation: ColumnGenerationConfig,
    pub pricer: PricerKind,
    pub solve: SolveOptions,
    /// Print every iteration
    pub verbose: bool,
    pub show_progress: bool,
}

/// Result of a column-generation run
pub struct CutstockResult {
    pub report: ColumnGenerationReport,
    pub pricer: &'static str,
    pub duration: Duration,
}

fn spinner(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {elapsed} | {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run column generation on `instance`
///
/// # Errors
///
/// Returns `ColumnGenerationError` naming the phase that failed.
pub fn run_cutstock(
    instance: &Instance,
    config: &CutstockConfig,
) -> Result<CutstockResult, ColumnGenerationError> {
    let solver = HighsSolver::new(config.solve.clone());
    let model_pricer = ModelPricer::new(&solver);
    let pricer: &dyn Pricer = match config.pricer {
        PricerKind::Model => &model_pricer,
        PricerKind::Dp => &KnapsackPricer,
    };

    let pb = spinner(config.show_progress);
    pb.set_message("solving relaxed master");

    let start = Instant::now();
    let result = ColumnGeneration::new(instance, &solver, pricer, config.column_generation).run_with(|record| {
        if config.verbose {
            pb.println(format_iteration(record));
        }
        pb.set_message(format!(
            "iteration {} | bound {:.4} | pool {}",
            record.iteration, record.relaxed_objective, record.pool_size
        ));
    });
    pb.finish_and_clear();

    Ok(CutstockResult {
        report: result?,
        pricer: pricer.name(),
        duration: start.elapsed(),
    })
}

/// Result of a compact-model run
pub struct CompactResult {
    pub solution: CompactSolution,
    /// Rolls the model was allowed to use
    pub roll_bound: usize,
    pub duration: Duration,
}

/// Solve the compact model on `instance`
///
/// # Errors
///
/// Returns the solver's failure, e.g. `Infeasible` when `max_rolls` is too
/// small or `TimeLimit`.
pub fn run_compact(
    instance: &Instance,
    max_rolls: Option<usize>,
    options: &SolveOptions,
    show_progress: bool,
) -> Result<CompactResult, SolveError> {
    let roll_bound = max_rolls.unwrap_or_else(|| trivial_roll_bound(instance));
    let solver = HighsSolver::new(options.clone());

    let pb = spinner(show_progress);
    pb.set_message(format!("compact model over {roll_bound} rolls"));
    let start = Instant::now();
    let solution = solve_compact(&solver, instance, Some(roll_bound));
    pb.finish_and_clear();

    Ok(CompactResult {
        solution: solution?,
        roll_bound,
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutting::{DemandMode, SeedPatterns};

    fn three_items() -> Instance {
        Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap()
    }

    #[test]
    fn generated_instance_is_reproducible() {
        let source = InstanceSource::default();
        let a = source.load().unwrap();
        let b = source.load().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert_eq!(a.roll_width(), 100);
        assert!(a.widths().all(|w| (1..50).contains(&w)));
        assert!(a.demands().all(|d| (1..50).contains(&d)));
    }

    #[test]
    fn missing_file_is_reported() {
        let source = InstanceSource {
            file: Some(PathBuf::from("/nonexistent/rolls.txt")),
            ..InstanceSource::default()
        };
        assert!(matches!(source.load(), Err(LoadError::Io(_))));
    }

    #[test]
    fn both_pricers_reach_same_bound() {
        let instance = three_items();
        for kind in [PricerKind::Model, PricerKind::Dp] {
            let config = CutstockConfig {
                pricer: kind,
                ..CutstockConfig::default()
            };
            let result = run_cutstock(&instance, &config).unwrap();
            assert!((result.report.relaxed_objective() - 3.0).abs() < 1e-6);
            assert!(result.report.integer_objective().is_some());
        }
    }

    #[test]
    fn pricer_names() {
        assert_eq!(PricerKind::from_name("dp"), PricerKind::Dp);
        assert_eq!(PricerKind::from_name("model"), PricerKind::Model);
        assert_eq!(PricerKind::from_name("anything"), PricerKind::Model);
    }

    #[test]
    fn generated_instance_solves_in_cover_mode() {
        let instance = InstanceSource::default().load().unwrap();
        let config = CutstockConfig {
            column_generation: ColumnGenerationConfig {
                seed: SeedPatterns::MaxFill,
                demand: DemandMode::Cover,
                ..ColumnGenerationConfig::default()
            },
            pricer: PricerKind::Dp,
            ..CutstockConfig::default()
        };
        let result = run_cutstock(&instance, &config).unwrap();
        let coverage = result.report.coverage(&instance).unwrap();
        for (covered, demand) in coverage.iter().zip(instance.demands()) {
            assert!(*covered >= f64::from(demand) - 1e-6);
        }
        assert!(result.report.integer_objective().unwrap() >= result.report.lower_bound() - 1e-6);
    }

    #[test]
    fn compact_uses_trivial_bound_by_default() {
        let instance = three_items();
        let result = run_compact(&instance, None, &SolveOptions::default(), false).unwrap();
        assert_eq!(result.roll_bound, 4);
        assert_eq!(result.solution.rolls_used, 3);
    }

    #[test]
    fn compact_solves_generated_instance_within_column_generation_bounds() {
        let instance = InstanceSource::default().load().unwrap();
        let options = SolveOptions::default().with_time_limit(Duration::from_secs(120));
        let compact = run_compact(&instance, None, &options, false).unwrap();

        let config = CutstockConfig {
            solve: options,
            ..CutstockConfig::default()
        };
        let report = run_cutstock(&instance, &config).unwrap().report;
        let rolls = compact.solution.rolls_used as f64;

        assert!(rolls >= report.lower_bound() - 1e-6);
        assert!(rolls <= report.integer_objective().unwrap() + 1e-6);
        let coverage = compact.solution.coverage(instance.len());
        assert!(coverage.iter().copied().eq(instance.demands()));
    }

    #[test]
    fn compact_with_too_few_rolls_fails() {
        let instance = three_items();
        assert_eq!(
            run_compact(&instance, Some(2), &SolveOptions::default(), false).err(),
            Some(SolveError::Infeasible)
        );
    }
}
