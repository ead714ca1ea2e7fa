//! Pricing subproblem
//!
//! Given the master's dual prices, find the pattern that fits on one roll
//! and has the largest total price. A roll costs one, so the pattern's
//! reduced cost is `1 - value`.

use crate::core::{Instance, Pattern};
use crate::lp::{Domain, LpSolver, ModelBuilder, Relation, SolveError, VarId};

/// Best pattern under a set of prices
#[derive(Debug, Clone, PartialEq)]
pub struct PricingSolution {
    pub pattern: Pattern,
    /// Sum of `price[i] * pattern[i]`
    pub value: f64,
}

impl PricingSolution {
    /// Reduced cost of the pattern in the master
    #[inline]
    #[must_use]
    pub fn reduced_cost(&self) -> f64 {
        1.0 - self.value
    }
}

/// Solves the pricing knapsack
pub trait Pricer {
    /// # Errors
    ///
    /// Returns the underlying solver failure, if any.
    fn price(&self, instance: &Instance, prices: &[f64]) -> Result<PricingSolution, SolveError>;

    fn name(&self) -> &'static str;
}

/// Formulates the knapsack as an integer program for an [`LpSolver`]
pub struct ModelPricer<S> {
    solver: S,
}

impl<S: LpSolver> ModelPricer<S> {
    #[must_use]
    pub const fn new(solver: S) -> Self {
        Self { solver }
    }
}

impl<S: LpSolver> Pricer for ModelPricer<S> {
    fn price(&self, instance: &Instance, prices: &[f64]) -> Result<PricingSolution, SolveError> {
        let mut builder = ModelBuilder::new("pricing");
        let usage: Vec<VarId> = (0..instance.len())
            .map(|i| builder.add_variable(format!("pieces_{i}"), Domain::Integer))
            .collect();
        builder.add_constraint(
            "roll_width",
            usage.iter().zip(instance.widths()).map(|(&var, w)| (var, f64::from(w))),
            Relation::LessEq,
            f64::from(instance.roll_width()),
        );
        builder.maximize(usage.iter().copied().zip(prices.iter().copied()));

        let solution = self.solver.solve(&builder.build())?;
        let counts = usage
            .iter()
            .map(|&var| solution.value(var).round().max(0.0) as u32)
            .collect();

        Ok(PricingSolution {
            pattern: Pattern::new(counts),
            value: solution.objective(),
        })
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

/// Unbounded knapsack by dynamic programming over the roll width
///
/// Exact for any prices. Memory and time grow linearly with the roll width.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnapsackPricer;

const IMPROVEMENT: f64 = 1e-12;

impl Pricer for KnapsackPricer {
    fn price(&self, instance: &Instance, prices: &[f64]) -> Result<PricingSolution, SolveError> {
        let capacity = instance.roll_width() as usize;
        let widths: Vec<usize> = instance.widths().map(|w| w as usize).collect();

        // best[c]: best value within capacity c; last[c]: item added to reach it
        let mut best = vec![0.0_f64; capacity + 1];
        let mut last: Vec<Option<usize>> = vec![None; capacity + 1];
        for c in 1..=capacity {
            best[c] = best[c - 1];
            for (i, (&width, &price)) in widths.iter().zip(prices).enumerate() {
                if price > 0.0 && width <= c {
                    let candidate = best[c - width] + price;
                    if candidate > best[c] + IMPROVEMENT {
                        best[c] = candidate;
                        last[c] = Some(i);
                    }
                }
            }
        }

        let mut counts = vec![0u32; widths.len()];
        let mut c = capacity;
        while c > 0 {
            match last[c] {
                Some(i) => {
                    counts[i] += 1;
                    c -= widths[i];
                }
                None => c -= 1,
            }
        }

        let pattern = Pattern::new(counts);
        Ok(PricingSolution {
            value: pattern.value(prices),
            pattern,
        })
    }

    fn name(&self) -> &'static str {
        "dp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::HighsSolver;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn instance() -> Instance {
        Instance::from_parts(100, &[10, 20, 30], &[5, 5, 5]).unwrap()
    }

    #[test]
    fn unit_prices_favour_smallest_item() {
        let inst = instance();
        let model = ModelPricer::new(HighsSolver::default());
        let pricers: [&dyn Pricer; 2] = [&model, &KnapsackPricer];
        for pricer in pricers {
            let solution = pricer.price(&inst, &[1.0, 1.0, 1.0]).unwrap();
            assert_eq!(solution.pattern.counts(), &[10, 0, 0], "{}", pricer.name());
            assert!((solution.reduced_cost() + 9.0).abs() < 1e-6);
        }
    }

    #[test]
    fn converged_prices_give_zero_reduced_cost() {
        let inst = instance();
        let solution = KnapsackPricer.price(&inst, &[0.1, 0.2, 0.3]).unwrap();
        assert!(solution.reduced_cost().abs() < 1e-6);
        assert!(solution.pattern.fits(&inst));
    }

    #[test]
    fn non_positive_prices_give_empty_pattern() {
        let inst = instance();
        let solution = KnapsackPricer.price(&inst, &[0.0, -1.0, 0.0]).unwrap();
        assert!(solution.pattern.is_empty());
        assert_eq!(solution.value, 0.0);
    }

    #[test]
    fn pricers_agree_on_value() {
        let mut rng = StdRng::seed_from_u64(9);
        let model = ModelPricer::new(HighsSolver::default());
        for _ in 0..10 {
            let inst = Instance::random(&mut rng, 4, 50, 30, 10).unwrap();
            let prices: Vec<f64> = inst.widths().map(|w| f64::from(w) / 47.0 + 0.01).collect();

            let exact = KnapsackPricer.price(&inst, &prices).unwrap();
            let formulated = model.price(&inst, &prices).unwrap();
            assert!((exact.value - formulated.value).abs() < 1e-6, "{inst}");
            assert!(exact.pattern.fits(&inst));
            assert!(formulated.pattern.fits(&inst));
        }
    }
}
