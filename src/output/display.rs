//! Display functions for command results

use super::formatters::{create_progress_bar, format_rolls, format_values};
use crate::commands::{AutoResult, BenchmarkResult, CompactResult, CutstockResult, PlaySummary, SearchReport};
use crate::core::Instance;
use crate::game::Feedback;
use colored::Colorize;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print the closing line of an interactive game
pub fn print_play_summary(summary: &PlaySummary) {
    println!();
    if summary.solved {
        println!(
            "{}",
            format!("✅ Solved in {} attempts", summary.attempts).green().bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not solved, the number was {}", summary.secret).red().bold()
        );
    }
    if summary.invalid_inputs > 0 {
        println!("   Rejected inputs: {}", summary.invalid_inputs);
    }
}

/// Print the guess path of an automated game
pub fn print_auto_result(result: &AutoResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Strategy {} vs secret {}",
        result.strategy.bright_yellow().bold(),
        result.outcome.secret.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, turn) in result.outcome.turns.iter().enumerate() {
        let marker = match turn.feedback {
            Feedback::Correct { .. } => "🎯".to_string(),
            Feedback::Higher { .. } => "⬆".green().to_string(),
            Feedback::Lower { .. } => "⬇".yellow().to_string(),
            Feedback::Invalid(_) => "✗".red().to_string(),
        };
        println!("\nTurn {}: {:>6} {marker}", i + 1, turn.guess);
        if verbose {
            println!("  Candidates: {}", turn.window_before);
            println!("  {}", turn.feedback);
        }
    }

    println!();
    if result.outcome.solved {
        println!(
            "{}",
            format!(
                "✅ Solved in {} attempts (binary-search worst case {})",
                result.outcome.attempts(),
                result.worst_case
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} attempts", result.outcome.attempts())
                .red()
                .bold()
        );
    }
    println!("   Time taken: {:.3}ms", result.duration.as_secs_f64() * 1_000.0);
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    header(&format!("BENCHMARK RESULTS: {}", result.strategy.to_uppercase()));

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!("   Solved:           {}", result.solved);
    println!(
        "   Average attempts: {}",
        format!("{:.3}", result.average_attempts).bright_yellow().bold()
    );
    println!("   Best case:        {}", format!("{}", result.min_attempts).green());
    println!("   Worst case:       {}", format!("{}", result.max_attempts).yellow());
    println!("   Oracle bound:     {}", result.worst_case_bound);
    println!(
        "   Oracle matches:   {} / {}",
        result.oracle_matches, result.total_games
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let mut counts: Vec<(usize, usize)> = result.distribution.iter().map(|(&k, &v)| (k, v)).collect();
    counts.sort_unstable();
    let max_count = counts.iter().map(|&(_, c)| c).max().unwrap_or(1);
    for (attempts, count) in counts.iter().take(20) {
        let pct = *count as f64 / result.solved.max(1) as f64 * 100.0;
        let bar = create_progress_bar(*count as f64, max_count as f64, 40);
        println!("   {attempts:3}: {} {count:5} ({pct:5.1}%)", bar.green());
    }
    if counts.len() > 20 {
        println!("   ... {} more rows", counts.len() - 20);
    }
}

/// Print both binary-search variants
pub fn print_search_report(report: &SearchReport) {
    header("BINARY SEARCH");
    println!("\n   Sequence:   1..{} ({} values)", report.len, report.len);
    println!("   Target:     {}", report.target.to_string().bright_yellow());

    for (name, outcome) in [("Recursive", &report.recursive), ("Iterative", &report.iterative)] {
        let found = outcome.index.map_or_else(
            || "not found".red().to_string(),
            |i| format!("index {i}").green().to_string(),
        );
        println!("   {name}:  {found} after {} attempts", outcome.attempts);
    }
    println!("   Worst case: {} attempts", report.worst_case);
}

/// Print the instance being solved
pub fn print_instance(instance: &Instance) {
    println!("\n📦 {}", "Instance".bright_cyan().bold());
    println!("   Roll width: {}", instance.roll_width());
    println!("   {:>6} {:>8} {:>10}", "item", "width", "demand");
    for (i, item) in instance.items().iter().enumerate() {
        println!("   {i:>6} {:>8} {:>10}", item.width, item.demand);
    }
    println!("   Material bound: {:.4} rolls", instance.material_bound());
}

/// Print a column-generation report
pub fn print_cutstock_result(instance: &Instance, result: &CutstockResult) {
    let report = &result.report;
    header("COLUMN GENERATION");

    println!("\n📊 {}", "Relaxation:".bright_cyan().bold());
    println!("   Pricer:          {}", result.pricer);
    println!("   Iterations:      {}", report.iterations.len());
    println!("   Patterns added:  {}", report.patterns_added());
    println!("   Pool size:       {}", report.pool.len());
    println!(
        "   Relaxed optimum: {}",
        format!("{:.4}", report.relaxed_objective()).bright_yellow().bold()
    );
    println!("   Lower bound:     {}", format_rolls(report.lower_bound()));
    println!("   Final duals:     {}", format_values(report.duals(), 4));

    if let Some(plan) = &report.integer {
        println!("\n✂️  {}", "Integer plan:".bright_cyan().bold());
        println!(
            "   Rolls used:      {}",
            format_rolls(plan.objective).bright_green().bold()
        );
        for (pattern, &times) in report.pool.iter().zip(&plan.usage) {
            if times > 0.5 {
                println!(
                    "   {:>4} x {}  (waste {})",
                    format_rolls(times),
                    pattern,
                    pattern.waste(instance)
                );
            }
        }
        let coverage = plan.coverage(instance, &report.pool);
        println!("   Coverage:        {}", format_values(&coverage, 0));
    }

    println!("\n   Time taken: {:.3}s", result.duration.as_secs_f64());
}

/// Print a compact-model solution
pub fn print_compact_result(instance: &Instance, result: &CompactResult) {
    header("COMPACT MODEL");
    println!("\n   Roll bound:  {}", result.roll_bound);
    println!(
        "   Rolls used:  {}",
        result.solution.rolls_used.to_string().bright_green().bold()
    );
    for (k, roll) in result.solution.rolls.iter().enumerate() {
        println!("   roll {k:>3}: {roll}  (waste {})", roll.waste(instance));
    }
    println!(
        "   Coverage:    {:?}",
        result.solution.coverage(instance.len())
    );
    println!("\n   Time taken: {:.3}s", result.duration.as_secs_f64());
}
