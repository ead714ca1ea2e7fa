//! Compact assignment model
//!
//! Kantorovich's formulation: with a bound of `K` rolls, integer `x[i,k]`
//! counts the pieces of item `i` cut from roll `k` and binary `y[k]` marks
//! roll `k` as used. Its LP relaxation is weak, so the MIP solver does most
//! of the work. Piece counts are capped by what fits on one roll and rolls
//! are used in index order, which removes most of the symmetric solutions.
//! Serves as a baseline for column generation.

use crate::core::{Instance, Pattern};
use crate::lp::{Domain, LpSolver, ModelBuilder, Relation, SolveError, VarId};

/// Rolls sufficient for any instance: each item cut alone at max fill
#[must_use]
pub fn trivial_roll_bound(instance: &Instance) -> usize {
    (0..instance.len())
        .zip(instance.demands())
        .map(|(i, demand)| demand.div_ceil(instance.max_pieces(i)) as usize)
        .sum()
}

/// Optimal plan of the compact model
#[derive(Debug, Clone, PartialEq)]
pub struct CompactSolution {
    pub rolls_used: usize,
    /// Cut list of every used roll
    pub rolls: Vec<Pattern>,
}

impl CompactSolution {
    /// Pieces of each item cut over all rolls
    #[must_use]
    pub fn coverage(&self, item_count: usize) -> Vec<u32> {
        let mut covered = vec![0; item_count];
        for roll in &self.rolls {
            for (slot, &count) in covered.iter_mut().zip(roll.counts()) {
                *slot += count;
            }
        }
        covered
    }
}

/// Solve the compact model with at most `max_rolls` rolls
///
/// `None` uses [`trivial_roll_bound`].
///
/// # Errors
///
/// Returns `SolveError::Infeasible` when `max_rolls` is too small, or the
/// solver's failure.
pub fn solve_compact<S: LpSolver + ?Sized>(
    solver: &S,
    instance: &Instance,
    max_rolls: Option<usize>,
) -> Result<CompactSolution, SolveError> {
    let rolls = max_rolls.unwrap_or_else(|| trivial_roll_bound(instance));
    let items = instance.len();
    let mut builder = ModelBuilder::new("compact");

    let pieces: Vec<Vec<VarId>> = (0..items)
        .zip(instance.demands())
        .map(|(i, demand)| {
            let cap = f64::from(demand.min(instance.max_pieces(i)));
            (0..rolls)
                .map(|k| builder.add_bounded_variable(format!("pieces_{i}_{k}"), Domain::Integer, cap))
                .collect()
        })
        .collect();
    let used: Vec<VarId> = (0..rolls)
        .map(|k| builder.add_variable(format!("used_{k}"), Domain::Binary))
        .collect();

    for (i, demand) in instance.demands().enumerate() {
        builder.add_constraint(
            format!("demand_{i}"),
            pieces[i].iter().map(|&var| (var, 1.0)),
            Relation::Equal,
            f64::from(demand),
        );
    }
    for (k, &roll) in used.iter().enumerate() {
        let terms = pieces
            .iter()
            .zip(instance.widths())
            .map(|(row, width)| (row[k], f64::from(width)))
            .chain(std::iter::once((roll, -f64::from(instance.roll_width()))));
        builder.add_constraint(format!("width_{k}"), terms, Relation::LessEq, 0.0);
    }
    for (k, pair) in used.windows(2).enumerate() {
        builder.add_constraint(
            format!("order_{k}"),
            [(pair[0], 1.0), (pair[1], -1.0)],
            Relation::GreaterEq,
            0.0,
        );
    }
    builder.minimize(used.iter().map(|&var| (var, 1.0)));

    let solution = solver.solve(&builder.build())?;

    let rolls: Vec<Pattern> = (0..rolls)
        .filter(|&k| solution.value(used[k]) > 0.5)
        .map(|k| {
            Pattern::new(
                pieces
                    .iter()
                    .map(|row| solution.value(row[k]).round().max(0.0) as u32)
                    .collect(),
            )
        })
        .collect();

    Ok(CompactSolution {
        rolls_used: rolls.len(),
        rolls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutting::{ColumnGeneration, ColumnGenerationConfig, KnapsackPricer};
    use crate::lp::HighsSolver;

    #[test]
    fn trivial_bound_cuts_each_item_alone() {
        let inst = Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap();
        assert_eq!(trivial_roll_bound(&inst), 4);

        let inst = Instance::from_parts(100, &[30, 45], &[2, 1]).unwrap();
        assert_eq!(trivial_roll_bound(&inst), 2);
    }

    #[test]
    fn two_item_instance() {
        let inst = Instance::from_parts(100, &[30, 45], &[2, 1]).unwrap();
        let solution = solve_compact(&HighsSolver::default(), &inst, Some(3)).unwrap();

        assert_eq!(solution.rolls_used, 2);
        assert_eq!(solution.coverage(inst.len()), vec![2, 1]);
        assert!(solution.rolls.iter().all(|roll| roll.fits(&inst)));
    }

    #[test]
    fn beats_exact_column_generation_plan() {
        let inst = Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap();
        let solver = HighsSolver::default();
        let compact = solve_compact(&solver, &inst, None).unwrap();

        let report = ColumnGeneration::new(&inst, &solver, &KnapsackPricer, ColumnGenerationConfig::default())
            .run()
            .unwrap();
        let cg_rolls = report.integer_objective().unwrap();

        assert_eq!(compact.rolls_used, 3);
        assert!(compact.rolls_used as f64 <= cg_rolls + 1e-6);
        assert!(compact.rolls_used as f64 >= report.lower_bound());
        assert_eq!(compact.coverage(inst.len()), vec![5, 5, 5]);
    }

    #[test]
    fn spare_rolls_stay_unused() {
        let inst = Instance::from_parts(100, &[30, 45], &[2, 1]).unwrap();
        let solution = solve_compact(&HighsSolver::default(), &inst, Some(4)).unwrap();

        assert_eq!(solution.rolls_used, 2);
        assert!(solution.rolls.iter().all(|roll| !roll.is_empty()));
    }

    #[test]
    fn too_few_rolls_is_infeasible() {
        let inst = Instance::from_parts(100, &[30, 45], &[2, 1]).unwrap();
        assert_eq!(
            solve_compact(&HighsSolver::default(), &inst, Some(1)),
            Err(SolveError::Infeasible)
        );
    }
}
