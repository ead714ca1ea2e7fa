//! Master problem over a pattern pool
//!
//! One variable per pattern (how many rolls are cut with it) and one demand
//! row per item. The relaxed master gives the dual prices that drive
//! pricing; the integer master gives the final cutting plan.

use crate::core::{Instance, PatternPool};
use crate::lp::{ConstraintId, Domain, LpSolver, Model, ModelBuilder, Relation, SolveError, VarId};

/// How the demand rows are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemandMode {
    /// Cut exactly the demanded number of pieces
    #[default]
    Exact,
    /// Cut at least the demanded number of pieces
    Cover,
}

impl DemandMode {
    #[must_use]
    pub const fn relation(self) -> Relation {
        match self {
            Self::Exact => Relation::Equal,
            Self::Cover => Relation::GreaterEq,
        }
    }
}

/// Master model together with the handles needed to read its solution
pub struct MasterModel {
    pub model: Model,
    pub usage: Vec<VarId>,
    pub demand_rows: Vec<ConstraintId>,
}

/// Build the master over every pattern currently in `pool`
#[must_use]
pub fn build_master(instance: &Instance, pool: &PatternPool, mode: DemandMode, domain: Domain) -> MasterModel {
    let mut builder = ModelBuilder::new("master");
    let usage: Vec<VarId> = (0..pool.len())
        .map(|p| builder.add_variable(format!("use_{p}"), domain))
        .collect();

    let demand_rows = instance
        .demands()
        .enumerate()
        .map(|(i, demand)| {
            let terms = pool
                .iter()
                .zip(&usage)
                .map(|(pattern, &var)| (var, f64::from(pattern.count(i))));
            builder.add_constraint(format!("demand_{i}"), terms, mode.relation(), f64::from(demand))
        })
        .collect();

    builder.minimize(usage.iter().map(|&var| (var, 1.0)));
    MasterModel {
        model: builder.build(),
        usage,
        demand_rows,
    }
}

/// Solved master problem
#[derive(Debug, Clone, PartialEq)]
pub struct MasterSolution {
    /// Rolls cut with each pattern, in pool order
    pub usage: Vec<f64>,
    /// Total rolls
    pub objective: f64,
    /// Price of one more piece of each item (relaxed master only)
    pub duals: Option<Vec<f64>>,
}

impl MasterSolution {
    /// Pieces of each item produced by the plan
    #[must_use]
    pub fn coverage(&self, instance: &Instance, pool: &PatternPool) -> Vec<f64> {
        pool.coverage(instance.len(), &self.usage)
    }
}

/// Build and solve the master
///
/// # Errors
///
/// Propagates the solver's failure.
pub fn solve_master<S: LpSolver + ?Sized>(
    solver: &S,
    instance: &Instance,
    pool: &PatternPool,
    mode: DemandMode,
    integer: bool,
) -> Result<MasterSolution, SolveError> {
    let domain = if integer { Domain::Integer } else { Domain::Continuous };
    let master = build_master(instance, pool, mode, domain);
    let solution = solver.solve(&master.model)?;

    let duals = if integer {
        None
    } else {
        master
            .demand_rows
            .iter()
            .map(|&row| solution.dual(row))
            .collect::<Option<Vec<f64>>>()
    };

    Ok(MasterSolution {
        usage: master.usage.iter().map(|&var| solution.value(var)).collect(),
        objective: solution.objective(),
        duals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::lp::HighsSolver;

    fn instance() -> Instance {
        Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap()
    }

    #[test]
    fn master_has_row_per_item_and_column_per_pattern() {
        let inst = instance();
        let pool = PatternPool::unit_diagonal(&inst);
        let master = build_master(&inst, &pool, DemandMode::Exact, Domain::Continuous);

        assert_eq!(master.usage.len(), 3);
        assert_eq!(master.demand_rows.len(), 3);
        assert!(
            master
                .model
                .constraints()
                .iter()
                .all(|c| c.relation == Relation::Equal && c.terms.len() == 1)
        );
    }

    #[test]
    fn unit_master_needs_one_roll_per_piece() {
        let inst = instance();
        let pool = PatternPool::unit_diagonal(&inst);
        let solution = solve_master(&HighsSolver::default(), &inst, &pool, DemandMode::Exact, false).unwrap();

        assert!((solution.objective - 15.0).abs() < 1e-6);
        let duals = solution.duals.unwrap();
        assert!(duals.iter().all(|&d| (d - 1.0).abs() < 1e-6));
    }

    #[test]
    fn max_fill_master_relaxation() {
        let inst = instance();
        let pool = PatternPool::max_fill_diagonal(&inst);
        let solution = solve_master(&HighsSolver::default(), &inst, &pool, DemandMode::Exact, false).unwrap();

        // 5/10 + 5/5 + 5/3
        assert!((solution.objective - 19.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn integer_master_has_no_duals_and_meets_demand() {
        let inst = instance();
        let mut pool = PatternPool::unit_diagonal(&inst);
        pool.push(Pattern::new(vec![1, 0, 3]));
        let solution = solve_master(&HighsSolver::default(), &inst, &pool, DemandMode::Exact, true).unwrap();

        assert!(solution.duals.is_none());
        let coverage = solution.coverage(&inst, &pool);
        for (covered, demand) in coverage.iter().zip(inst.demands()) {
            assert!((covered - f64::from(demand)).abs() < 1e-6);
        }
    }

    #[test]
    fn exact_max_fill_integer_master_is_infeasible() {
        let inst = instance();
        let pool = PatternPool::max_fill_diagonal(&inst);
        let exact = solve_master(&HighsSolver::default(), &inst, &pool, DemandMode::Exact, true);
        assert_eq!(exact.unwrap_err(), SolveError::Infeasible);

        let cover = solve_master(&HighsSolver::default(), &inst, &pool, DemandMode::Cover, true).unwrap();
        // ceil(5/10) + ceil(5/5) + ceil(5/3)
        assert!((cover.objective - 4.0).abs() < 1e-6);
    }
}
