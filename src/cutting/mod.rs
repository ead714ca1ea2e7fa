//! One-dimensional cutting stock
//!
//! Column generation over a pattern pool, the compact assignment model it is
//! compared against, and instance file loading.

mod column_generation;
mod compact;
mod loader;
mod master;
mod pricing;

pub use column_generation::{
    ColumnGeneration, ColumnGenerationConfig, ColumnGenerationError, ColumnGenerationReport,
    IterationRecord, Phase, SeedPatterns,
};
pub use compact::{CompactSolution, solve_compact, trivial_roll_bound};
pub use loader::{LoadError, load_from_file, parse_instance};
pub use master::{DemandMode, MasterModel, MasterSolution, build_master, solve_master};
pub use pricing::{KnapsackPricer, ModelPricer, Pricer, PricingSolution};
