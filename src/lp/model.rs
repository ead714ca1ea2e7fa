//! Optimization models as plain values
//!
//! A `ModelBuilder` accumulates variables, linear constraints and a linear
//! objective; `build` turns them into an immutable `Model` that any
//! [`LpSolver`](super::LpSolver) can consume. All variables are non-negative.

use std::fmt;

/// Handle to a variable of the model that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle to a constraint of the model that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(usize);

impl ConstraintId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Values a variable may take (always `>= 0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Continuous,
    Integer,
    /// Integer in `{0, 1}`
    Binary,
}

impl Domain {
    #[inline]
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Integer | Self::Binary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEq,
    GreaterEq,
    Equal,
}

impl Relation {
    /// Whether `lhs <relation> rhs` holds within `tolerance`
    #[must_use]
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Self::LessEq => lhs <= rhs + tolerance,
            Self::GreaterEq => lhs >= rhs - tolerance,
            Self::Equal => (lhs - rhs).abs() <= tolerance,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LessEq => write!(f, "<="),
            Self::GreaterEq => write!(f, ">="),
            Self::Equal => write!(f, "=="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub domain: Domain,
    /// Optional upper bound; the lower bound is always zero
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    /// Left-hand side evaluated at `values`
    #[must_use]
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values[var.index()])
            .sum()
    }
}

/// An immutable linear (or mixed-integer linear) program
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Vec<(VarId, f64)>,
    sense: Sense,
}

impl Model {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    #[must_use]
    pub const fn sense(&self) -> Sense {
        self.sense
    }

    #[must_use]
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    #[must_use]
    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.index()]
    }

    /// Whether any variable is integer or binary
    #[must_use]
    pub fn is_mip(&self) -> bool {
        self.variables.iter().any(|v| v.domain.is_integral())
    }

    /// Objective value at `values`
    #[must_use]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|&(var, coef)| coef * values[var.index()])
            .sum()
    }

    /// Whether `values` satisfies bounds, integrality and every constraint
    #[must_use]
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let bounds_ok = self.variables.iter().zip(values).all(|(var, &value)| {
            value >= -tolerance
                && var.upper.is_none_or(|ub| value <= ub + tolerance)
                && (!var.domain.is_integral() || (value - value.round()).abs() <= tolerance)
        });
        bounds_ok
            && self
                .constraints
                .iter()
                .all(|c| c.relation.holds(c.lhs(values), c.rhs, tolerance))
    }
}

/// Accumulates a model one variable and constraint at a time
///
/// # Examples
/// ```
/// use mip_katas::lp::{Domain, ModelBuilder, Relation};
///
/// let mut builder = ModelBuilder::new("knapsack");
/// let a = builder.add_variable("a", Domain::Integer);
/// let b = builder.add_variable("b", Domain::Integer);
/// builder.add_constraint("width", [(a, 3.0), (b, 5.0)], Relation::LessEq, 14.0);
/// builder.maximize([(a, 2.0), (b, 3.5)]);
/// let model = builder.build();
///
/// assert_eq!(model.variables().len(), 2);
/// assert!(model.is_mip());
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Vec<(VarId, f64)>,
    sense: Sense,
}

impl ModelBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Vec::new(),
            sense: Sense::Minimize,
        }
    }

    /// Add a non-negative variable; binaries get an upper bound of one
    pub fn add_variable(&mut self, name: impl Into<String>, domain: Domain) -> VarId {
        let upper = (domain == Domain::Binary).then_some(1.0);
        self.push_variable(Variable {
            name: name.into(),
            domain,
            upper,
        })
    }

    /// Add a variable in `[0, upper]`
    pub fn add_bounded_variable(&mut self, name: impl Into<String>, domain: Domain, upper: f64) -> VarId {
        let upper = if domain == Domain::Binary {
            upper.min(1.0)
        } else {
            upper
        };
        self.push_variable(Variable {
            name: name.into(),
            domain,
            upper: Some(upper),
        })
    }

    fn push_variable(&mut self, variable: Variable) -> VarId {
        self.variables.push(variable);
        VarId(self.variables.len() - 1)
    }

    /// Add `sum(coef * var) <relation> rhs`
    ///
    /// Terms with a zero coefficient are dropped.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: impl IntoIterator<Item = (VarId, f64)>,
        relation: Relation,
        rhs: f64,
    ) -> ConstraintId {
        self.constraints.push(Constraint {
            name: name.into(),
            terms: terms.into_iter().filter(|&(_, coef)| coef != 0.0).collect(),
            relation,
            rhs,
        });
        ConstraintId(self.constraints.len() - 1)
    }

    pub fn minimize(&mut self, terms: impl IntoIterator<Item = (VarId, f64)>) {
        self.objective = terms.into_iter().collect();
        self.sense = Sense::Minimize;
    }

    pub fn maximize(&mut self, terms: impl IntoIterator<Item = (VarId, f64)>) {
        self.objective = terms.into_iter().collect();
        self.sense = Sense::Maximize;
    }

    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn build(self) -> Model {
        Model {
            name: self.name,
            variables: self.variables,
            constraints: self.constraints,
            objective: self.objective,
            sense: self.sense,
        }
    }
}
