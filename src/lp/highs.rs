//! HiGHS backend through `good_lp`
//!
//! Each call translates the `Model` into a fresh `good_lp` problem, solves
//! it with HiGHS and reads values (and, for pure LPs, row duals) back by
//! position.

use good_lp::constraint::{eq, geq, leq};
use good_lp::solvers::highs::highs;
use good_lp::solvers::{DualValues, SolutionWithDual};
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, Variable,
    WithMipGap, WithTimeLimit, variable,
};

use super::model::{Domain, Model, Relation, Sense, VarId};
use super::solver::{Budget, LpSolver, Solution, SolveError, SolveOptions};

/// Relative gap at which HiGHS may stop a MIP; pricing needs true optima
const MIP_GAP: f32 = 1e-9;

/// HiGHS, with integer variables handled by its branch-and-cut
///
/// # Examples
/// ```
/// use mip_katas::lp::{Domain, HighsSolver, LpSolver, ModelBuilder, Relation};
///
/// let mut builder = ModelBuilder::new("demo");
/// let x = builder.add_variable("x", Domain::Continuous);
/// let y = builder.add_variable("y", Domain::Continuous);
/// let need = builder.add_constraint("need", [(x, 1.0), (y, 2.0)], Relation::GreaterEq, 4.0);
/// builder.minimize([(x, 1.0), (y, 3.0)]);
///
/// let solution = HighsSolver::default().solve(&builder.build()).unwrap();
/// assert!((solution.objective() - 4.0).abs() < 1e-6);
/// assert!((solution.dual(need).unwrap() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    options: SolveOptions,
}

impl HighsSolver {
    #[must_use]
    pub const fn new(options: SolveOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &SolveOptions {
        &self.options
    }
}

fn linear(columns: &[Variable], terms: &[(VarId, f64)]) -> Expression {
    let mut expr = Expression::with_capacity(terms.len());
    for &(var, coef) in terms {
        expr.add_mul(coef, columns[var.index()]);
    }
    expr
}

fn map_resolution_error(error: ResolutionError) -> SolveError {
    match error {
        ResolutionError::Infeasible => SolveError::Infeasible,
        ResolutionError::Unbounded => SolveError::Unbounded,
        other => SolveError::Backend(other.to_string()),
    }
}

impl LpSolver for HighsSolver {
    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        let budget = Budget::new(&self.options);
        budget.check()?;

        let mut vars = ProblemVariables::new();
        let columns: Vec<Variable> = model
            .variables()
            .iter()
            .map(|var| {
                let mut definition = variable().min(0.0).name(var.name.as_str());
                definition = match var.domain {
                    Domain::Continuous => definition,
                    Domain::Integer => definition.integer(),
                    Domain::Binary => definition.binary(),
                };
                if let Some(upper) = var.upper {
                    definition = definition.max(upper);
                }
                vars.add(definition)
            })
            .collect();

        let objective = linear(&columns, model.objective());
        let unsolved = match model.sense() {
            Sense::Minimize => vars.minimise(objective),
            Sense::Maximize => vars.maximise(objective),
        };
        let mut problem = highs(unsolved)
            .with_mip_gap(MIP_GAP)
            .map_err(|e| SolveError::Backend(e.to_string()))?;
        if let Some(remaining) = budget.remaining() {
            problem = problem.with_time_limit(remaining.as_secs_f64());
        }

        let mut rows = Vec::with_capacity(model.constraints().len());
        for constraint in model.constraints() {
            let lhs = linear(&columns, &constraint.terms);
            let row = match constraint.relation {
                Relation::LessEq => leq(lhs, constraint.rhs),
                Relation::GreaterEq => geq(lhs, constraint.rhs),
                Relation::Equal => eq(lhs, constraint.rhs),
            };
            rows.push(problem.add_constraint(row));
        }

        let result = problem.solve();
        // HiGHS stops quietly at its time limit, so the deadline decides
        budget.check()?;
        let mut solved = result.map_err(map_resolution_error)?;

        let values: Vec<f64> = columns.iter().map(|&column| solved.value(column)).collect();
        let objective = model.evaluate(&values);
        let duals = if model.is_mip() {
            None
        } else {
            let dual = solved.compute_dual();
            Some(rows.into_iter().map(|row| dual.dual(row)).collect())
        };

        Ok(Solution::new(values, objective, duals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::model::{ConstraintId, ModelBuilder};
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    const EPS: f64 = 1e-6;

    fn transport() -> (Model, ConstraintId, ConstraintId) {
        // min 2x + 3y, x + y >= 10, x <= 6
        let mut b = ModelBuilder::new("transport");
        let x = b.add_variable("x", Domain::Continuous);
        let y = b.add_variable("y", Domain::Continuous);
        let demand = b.add_constraint("demand", [(x, 1.0), (y, 1.0)], Relation::GreaterEq, 10.0);
        let cap = b.add_constraint("cap", [(x, 1.0)], Relation::LessEq, 6.0);
        b.minimize([(x, 2.0), (y, 3.0)]);
        (b.build(), demand, cap)
    }

    #[test]
    fn lp_solution_carries_duals() {
        let (model, demand, cap) = transport();
        let solution = HighsSolver::default().solve(&model).unwrap();

        assert!((solution.objective() - 24.0).abs() < EPS);
        assert!((solution.dual(demand).unwrap() - 3.0).abs() < EPS);
        assert!((solution.dual(cap).unwrap() + 1.0).abs() < EPS);
        assert!(model.is_feasible(solution.values(), EPS));
    }

    #[test]
    fn equality_rows_price_at_marginal_cost() {
        // min x + 2y, x + y == 4, x <= 1  =>  x = 1, y = 3
        let mut b = ModelBuilder::new("equality");
        let x = b.add_bounded_variable("x", Domain::Continuous, 1.0);
        let y = b.add_variable("y", Domain::Continuous);
        let total = b.add_constraint("total", [(x, 1.0), (y, 1.0)], Relation::Equal, 4.0);
        b.minimize([(x, 1.0), (y, 2.0)]);
        let solution = HighsSolver::default().solve(&b.build()).unwrap();

        assert!((solution.objective() - 7.0).abs() < EPS);
        assert!((solution.dual(total).unwrap() - 2.0).abs() < EPS);
        assert_eq!(solution.duals().map(<[f64]>::len), Some(1));
    }

    #[test]
    fn maximization_reaches_textbook_optimum() {
        // Wyndor Glass: max 3x + 5y, x <= 4, 2y <= 12, 3x + 2y <= 18
        let mut b = ModelBuilder::new("wyndor");
        let x = b.add_variable("x", Domain::Continuous);
        let y = b.add_variable("y", Domain::Continuous);
        b.add_constraint("plant1", [(x, 1.0)], Relation::LessEq, 4.0);
        b.add_constraint("plant2", [(y, 2.0)], Relation::LessEq, 12.0);
        b.add_constraint("plant3", [(x, 3.0), (y, 2.0)], Relation::LessEq, 18.0);
        b.maximize([(x, 3.0), (y, 5.0)]);
        let solution = HighsSolver::default().solve(&b.build()).unwrap();

        assert!((solution.objective() - 36.0).abs() < EPS);
        assert!((solution.value(x) - 2.0).abs() < EPS);
        assert!((solution.value(y) - 6.0).abs() < EPS);
    }

    #[test]
    fn mip_solution_has_no_duals() {
        let mut b = ModelBuilder::new("mip");
        let x = b.add_variable("x", Domain::Integer);
        let c = b.add_constraint("c", [(x, 2.0)], Relation::LessEq, 5.0);
        b.maximize([(x, 1.0)]);
        let solution = HighsSolver::default().solve(&b.build()).unwrap();

        assert!((solution.value(x) - 2.0).abs() < EPS);
        assert_eq!(solution.dual(c), None);
        assert!(solution.duals().is_none());
    }

    #[test]
    fn binary_knapsack() {
        // values 10, 13, 7; weights 5, 6, 4; capacity 10  =>  items 2 and 3
        let mut b = ModelBuilder::new("knapsack");
        let items: Vec<_> = (0..3)
            .map(|i| b.add_variable(format!("take{i}"), Domain::Binary))
            .collect();
        b.add_constraint(
            "capacity",
            items.iter().copied().zip([5.0, 6.0, 4.0]),
            Relation::LessEq,
            10.0,
        );
        b.maximize(items.iter().copied().zip([10.0, 13.0, 7.0]));
        let model = b.build();
        let solution = HighsSolver::default().solve(&model).unwrap();

        assert!((solution.objective() - 20.0).abs() < EPS);
        assert!(model.is_feasible(solution.values(), EPS));
        assert!(solution.value(items[0]).abs() < EPS);
    }

    #[test]
    fn infeasible_and_unbounded_are_errors() {
        let mut b = ModelBuilder::new("infeasible");
        let x = b.add_variable("x", Domain::Continuous);
        b.add_constraint("c", [(x, 1.0)], Relation::LessEq, -1.0);
        b.minimize([(x, 1.0)]);
        assert_eq!(
            HighsSolver::default().solve(&b.build()),
            Err(SolveError::Infeasible)
        );

        let mut b = ModelBuilder::new("unbounded");
        let x = b.add_variable("x", Domain::Continuous);
        let y = b.add_variable("y", Domain::Continuous);
        b.add_constraint("c", [(x, 1.0), (y, -1.0)], Relation::LessEq, 1.0);
        b.maximize([(x, 1.0), (y, 1.0)]);
        assert!(HighsSolver::default().solve(&b.build()).is_err());
    }

    #[test]
    fn interrupt_flag_stops_solve() {
        let flag = Arc::new(AtomicBool::new(true));
        let solver = HighsSolver::new(SolveOptions::default().with_interrupt(flag));
        let (model, _, _) = transport();
        assert_eq!(solver.solve(&model), Err(SolveError::Interrupted));
    }

    #[test]
    fn zero_time_limit_stops_solve() {
        let solver = HighsSolver::new(SolveOptions::default().with_time_limit(Duration::ZERO));
        let (model, _, _) = transport();
        assert_eq!(solver.solve(&model), Err(SolveError::TimeLimit));
    }

    #[test]
    fn generous_time_limit_still_solves() {
        let solver = HighsSolver::new(SolveOptions::default().with_time_limit(Duration::from_secs(60)));
        let (model, _, _) = transport();
        assert!((solver.solve(&model).unwrap().objective() - 24.0).abs() < EPS);
    }

    #[test]
    fn solver_reference_is_a_solver() {
        fn objective_of(solver: impl LpSolver, model: &Model) -> f64 {
            solver.solve(model).map_or(f64::NAN, |s| s.objective())
        }
        let solver = HighsSolver::default();
        let (model, _, _) = transport();
        assert!((objective_of(&solver, &model) - 24.0).abs() < EPS);
    }
}
