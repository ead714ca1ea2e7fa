//! Command implementations

pub mod auto;
pub mod benchmark;
pub mod cutstock;
pub mod play;
pub mod search;

pub use auto::{AutoConfig, AutoResult, run_auto};
pub use benchmark::{BenchmarkResult, run_benchmark};
pub use cutstock::{
    CompactResult, CutstockConfig, CutstockResult, InstanceSource, PricerKind, run_compact,
    run_cutstock,
};
pub use play::{PlaySummary, run_play};
pub use search::{SearchReport, run_search};
