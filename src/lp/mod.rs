//! Linear and mixed-integer programming
//!
//! Models are built explicitly with [`ModelBuilder`] and solved through the
//! [`LpSolver`] trait. [`HighsSolver`] hands them to HiGHS via `good_lp`.

mod highs;
mod model;
mod solver;

pub use highs::HighsSolver;
pub use model::{
    Constraint, ConstraintId, Domain, Model, ModelBuilder, Relation, Sense, VarId, Variable,
};
pub use solver::{LpSolver, Solution, SolveError, SolveOptions};
