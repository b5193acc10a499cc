//! An engine-neutral constraint model.
//!
//! A [`Model`] owns integer and boolean decision variables and an append-only list of
//! [`ModelConstraint`]s. It does not know about any solver; a
//! [`SolvingEngine`](crate::engine::SolvingEngine) translates it into its own representation.
//!
//! ```rust
//! # use timeslot_core::model::LinearConstraint;
//! # use timeslot_core::model::Model;
//! let mut model = Model::default();
//!
//! let start = model.new_integer(0, 10, "start").unwrap();
//! let end = model.new_integer(0, 12, "end").unwrap();
//! let present = model.new_boolean("present");
//!
//! // present -> end == start + 2
//! model.add(LinearConstraint::equals(end, start.into_expr() + 2).enforced_by(present));
//! assert_eq!(model.constraints().len(), 1);
//! ```
mod assignment;
mod constraint;
mod expression;
mod interval;
mod model_error;
mod variables;

pub use assignment::Assignment;
pub use constraint::LinearConstraint;
pub use constraint::ModelConstraint;
pub use constraint::Relation;
pub use expression::LinearExpr;
pub use expression::Operand;
pub use interval::IntervalVar;
pub use model_error::ModelError;
pub use variables::BoolLiteral;
pub use variables::BoolVar;
pub use variables::IntVar;
pub use variables::IntegerDomain;

#[derive(Clone, Debug, Default)]
pub struct Model {
    integers: Vec<IntegerDomain>,
    booleans: Vec<String>,
    constraints: Vec<ModelConstraint>,
}

impl Model {
    /// Creates an integer variable with domain `[lower_bound, upper_bound]`.
    pub fn new_integer(
        &mut self,
        lower_bound: i64,
        upper_bound: i64,
        name: impl Into<String>,
    ) -> Result<IntVar, ModelError> {
        let name = name.into();
        if lower_bound > upper_bound {
            return Err(ModelError::EmptyDomain {
                name,
                lower_bound,
                upper_bound,
            });
        }

        self.integers.push(IntegerDomain {
            lower_bound,
            upper_bound,
            name,
        });
        Ok(IntVar(self.integers.len() - 1))
    }

    /// Creates an integer variable which can only take `value`.
    pub fn new_constant(&mut self, value: i64, name: impl Into<String>) -> IntVar {
        self.integers.push(IntegerDomain {
            lower_bound: value,
            upper_bound: value,
            name: name.into(),
        });
        IntVar(self.integers.len() - 1)
    }

    pub fn new_boolean(&mut self, name: impl Into<String>) -> BoolVar {
        self.booleans.push(name.into());
        BoolVar(self.booleans.len() - 1)
    }

    pub fn add(&mut self, constraint: impl Into<ModelConstraint>) {
        self.constraints.push(constraint.into());
    }

    /// Adds `quotient == floor(numerator / divisor)`, enforced when `enforcement` holds.
    pub fn add_floor_division(
        &mut self,
        quotient: IntVar,
        numerator: impl Into<LinearExpr>,
        divisor: i64,
        enforcement: Option<BoolLiteral>,
    ) -> Result<(), ModelError> {
        if divisor <= 0 {
            return Err(ModelError::NonPositiveDivisor(divisor));
        }

        self.add(ModelConstraint::FloorDivision {
            quotient,
            numerator: numerator.into(),
            divisor,
            enforcement,
        });
        Ok(())
    }

    /// Forces `literal` to be true.
    pub fn fix(&mut self, literal: impl Into<BoolLiteral>) {
        self.add(ModelConstraint::Clause(vec![literal.into()]));
    }

    pub fn integer_domain(&self, variable: IntVar) -> &IntegerDomain {
        &self.integers[variable.index()]
    }

    pub fn integers(&self) -> impl Iterator<Item = (IntVar, &IntegerDomain)> + '_ {
        self.integers
            .iter()
            .enumerate()
            .map(|(index, domain)| (IntVar(index), domain))
    }

    pub fn boolean_name(&self, variable: BoolVar) -> &str {
        &self.booleans[variable.index()]
    }

    pub fn num_integers(&self) -> usize {
        self.integers.len()
    }

    pub fn num_booleans(&self) -> usize {
        self.booleans.len()
    }

    pub fn constraints(&self) -> &[ModelConstraint] {
        &self.constraints
    }

    /// Returns the first constraint violated by `assignment`, if any. Variables outside their
    /// domain are reported as a violation of their name.
    pub fn first_violation(&self, assignment: &Assignment) -> Option<String> {
        if let Some((_, domain)) = self.integers().find(|&(variable, domain)| {
            let value = assignment.value(variable);
            value < domain.lower_bound || value > domain.upper_bound
        }) {
            return Some(format!("domain of '{}'", domain.name));
        }

        self.constraints
            .iter()
            .find(|constraint| !constraint.is_satisfied_by(assignment))
            .map(|constraint| format!("{constraint:?}"))
    }
}

impl IntVar {
    /// Shorthand for `LinearExpr::from(self)`.
    pub fn into_expr(self) -> LinearExpr {
        self.into()
    }
}
