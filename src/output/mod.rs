//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_auto_result, print_benchmark_result, print_compact_result, print_cutstock_result,
    print_instance, print_play_summary, print_search_report,
};
pub use formatters::format_iteration;
