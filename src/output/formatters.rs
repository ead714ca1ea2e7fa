//! Formatting utilities for terminal output

use crate::cutting::IterationRecord;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a list of floats with fixed precision
#[must_use]
pub fn format_values(values: &[f64], precision: usize) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.precision$}")).collect();
    format!("[{}]", parts.join(", "))
}

/// One line per column-generation iteration
#[must_use]
pub fn format_iteration(record: &IterationRecord) -> String {
    let verdict = if record.added { "added" } else { "converged" };
    format!(
        "  iter {:>3} | bound {:>10.4} | duals {} | pattern {} (value {:.4}) | rc {:>+9.4} | min rc {:>+9.4} | {verdict} ({} patterns)",
        record.iteration,
        record.relaxed_objective,
        format_values(&record.duals, 4),
        record.pattern,
        record.pricing_value,
        record.reduced_cost,
        record.min_reduced_cost,
        record.pool_size
    )
}

/// Roll count for display, rounded once it is integral
#[must_use]
pub fn format_rolls(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.4}")
    }
}
