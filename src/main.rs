//! MIP Katas - CLI
//!
//! Guessing game, binary-search oracle and cutting-stock solvers from the
//! command line.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use mip_katas::{
    commands::{
        AutoConfig, CutstockConfig, InstanceSource, PricerKind, run_auto, run_benchmark,
        run_compact, run_cutstock, run_play, run_search,
    },
    cutting::{ColumnGenerationConfig, DemandMode, SeedPatterns},
    game::{GameConfig, Session, TerminalSurface},
    lp::SolveOptions,
    output::{
        print_auto_result, print_benchmark_result, print_compact_result, print_cutstock_result,
        print_instance, print_play_summary, print_search_report,
    },
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "mip_katas",
    about = "Binary search, a guessing game and column generation for cutting stock",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Guess the secret number on the terminal (default)
    Play {
        /// Secrets are drawn from 1..=max
        #[arg(short, long, default_value = "100")]
        max: i64,

        /// Seed for the secret (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Let a computer opponent play one game
    Auto {
        /// Secret to play against (seeded random if omitted)
        #[arg(long)]
        secret: Option<i64>,

        /// Strategy: bisection (default), random, linear
        #[arg(short, long, default_value = "bisection")]
        strategy: String,

        #[arg(short, long, default_value = "100")]
        max: i64,

        #[arg(long, default_value = "1")]
        seed: u64,

        /// Show the window size and hint of every turn
        #[arg(short, long)]
        verbose: bool,
    },

    /// Let a computer opponent play every secret in 1..=max
    Benchmark {
        /// Strategy: bisection (default), random, linear
        #[arg(short, long, default_value = "bisection")]
        strategy: String,

        #[arg(short, long, default_value = "100")]
        max: i64,

        #[arg(long, default_value = "1")]
        seed: u64,
    },

    /// Run the binary-search oracle on 1..=len
    Search {
        #[arg(short, long)]
        target: i64,

        #[arg(short, long, default_value = "100")]
        len: i64,
    },

    /// Solve cutting stock by column generation
    Cutstock {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Initial patterns: unit (default) or max-fill
        #[arg(long, default_value = "unit")]
        seed_patterns: String,

        /// Allow overproduction (>= demand rows instead of ==)
        #[arg(long)]
        cover: bool,

        /// Pricing backend: model (default) or dp
        #[arg(long, default_value = "model")]
        pricer: String,

        /// Stop after this many relaxed solves
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Skip the integer resolve
        #[arg(long)]
        relaxed_only: bool,

        /// Print every iteration
        #[arg(short, long)]
        verbose: bool,
    },

    /// Solve cutting stock with the compact assignment model
    Compact {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Rolls available to the model (default: one item per roll bound)
        #[arg(short = 'k', long)]
        max_rolls: Option<usize>,
    },
}

#[derive(Args)]
struct InstanceArgs {
    /// Instance file: roll width on the first line, then `width demand` lines
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of random item types
    #[arg(short = 'n', long, default_value = "5")]
    items: usize,

    #[arg(short = 'w', long, default_value = "100")]
    roll_width: u32,

    #[arg(long, default_value = "1")]
    seed: u64,

    /// Give up solving after this many seconds
    #[arg(long)]
    time_limit: Option<f64>,
}

impl InstanceArgs {
    fn source(&self) -> InstanceSource {
        InstanceSource {
            file: self.file.clone(),
            items: self.items,
            roll_width: self.roll_width,
            seed: self.seed,
            ..InstanceSource::default()
        }
    }

    fn solve_options(&self) -> Result<SolveOptions> {
        let options = SolveOptions::default();
        match self.time_limit {
            Some(secs) if secs.is_finite() && secs > 0.0 => {
                Ok(options.with_time_limit(Duration::from_secs_f64(secs)))
            }
            Some(secs) => bail!("Time limit must be a positive number of seconds, got {secs}"),
            None => Ok(options),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        max: 100,
        seed: None,
    });

    match command {
        Commands::Play { max, seed } => run_play_command(max, seed),
        Commands::Auto {
            secret,
            strategy,
            max,
            seed,
            verbose,
        } => run_auto_command(secret, strategy, max, seed, verbose),
        Commands::Benchmark {
            strategy,
            max,
            seed,
        } => {
            println!("Running {strategy} on every secret in 1..={max}...");
            let result = run_benchmark(&strategy, max, seed, true)?;
            print_benchmark_result(&result);
            Ok(())
        }
        Commands::Search { target, len } => {
            let (_, report) = run_search(target, len)?;
            print_search_report(&report);
            Ok(())
        }
        Commands::Cutstock {
            instance,
            seed_patterns,
            cover,
            pricer,
            max_iterations,
            relaxed_only,
            verbose,
        } => {
            let column_generation = ColumnGenerationConfig {
                max_iterations,
                seed: SeedPatterns::from_name(&seed_patterns),
                demand: if cover { DemandMode::Cover } else { DemandMode::Exact },
                integer_resolve: !relaxed_only,
                ..ColumnGenerationConfig::default()
            };
            let config = CutstockConfig {
                column_generation,
                pricer: PricerKind::from_name(&pricer),
                solve: instance.solve_options()?,
                verbose,
                show_progress: true,
            };
            run_cutstock_command(&instance, &config)
        }
        Commands::Compact {
            instance,
            max_rolls,
        } => run_compact_command(&instance, max_rolls),
    }
}

fn run_play_command(max: i64, seed: Option<u64>) -> Result<()> {
    let config = GameConfig {
        seed,
        ..GameConfig::new(max)
    };
    let mut rng = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let session = Session::new(&config, &mut rng)?;

    let mut surface = TerminalSurface::stdio();
    let summary = run_play(&mut surface, session, config.max_attempts)?;
    print_play_summary(&summary);
    Ok(())
}

fn run_auto_command(secret: Option<i64>, strategy: String, max: i64, seed: u64, verbose: bool) -> Result<()> {
    let config = AutoConfig {
        secret,
        seed,
        ..AutoConfig::new(max, strategy)
    };
    let result = run_auto(&config)?;
    print_auto_result(&result, verbose);
    Ok(())
}

fn run_cutstock_command(args: &InstanceArgs, config: &CutstockConfig) -> Result<()> {
    let instance = args.source().load()?;
    print_instance(&instance);

    let result = run_cutstock(&instance, config)?;
    print_cutstock_result(&instance, &result);
    Ok(())
}

fn run_compact_command(args: &InstanceArgs, max_rolls: Option<usize>) -> Result<()> {
    let instance = args.source().load()?;
    print_instance(&instance);

    let result = run_compact(&instance, max_rolls, &args.solve_options()?, true)?;
    print_compact_result(&instance, &result);
    Ok(())
}
