//! MIP Katas
//!
//! Small optimization exercises built on one toolkit: a binary-search
//! oracle, a number-guessing game with computer opponents, an explicit
//! LP/MIP model layer solved by HiGHS, and column generation for
//! one-dimensional cutting stock.
//!
//! # Quick Start
//!
//! ```rust
//! use mip_katas::core::Instance;
//! use mip_katas::cutting::{ColumnGeneration, ColumnGenerationConfig, ModelPricer};
//! use mip_katas::lp::HighsSolver;
//!
//! let instance = Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap();
//! let solver = HighsSolver::default();
//! let pricer = ModelPricer::new(&solver);
//! let report = ColumnGeneration::new(&instance, &solver, &pricer, ColumnGenerationConfig::default())
//!     .run()
//!     .unwrap();
//! println!("Relaxed optimum: {}", report.relaxed_objective());
//! ```

// Core domain types
pub mod core;

// Binary-search oracle
pub mod search;

// Guessing game
pub mod game;

// Linear and integer programming
pub mod lp;

// Cutting stock
pub mod cutting;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
