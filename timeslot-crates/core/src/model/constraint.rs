use super::Assignment;
use super::BoolLiteral;
use super::BoolVar;
use super::IntVar;
use super::IntervalVar;
use super::LinearExpr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    LessThanOrEqual,
    Equal,
}

/// The constraint `expression <relation> 0`, optionally only enforced when `enforcement` holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expression: LinearExpr,
    pub relation: Relation,
    pub enforcement: Option<BoolLiteral>,
}

impl LinearConstraint {
    /// Creates `lhs <= rhs`.
    pub fn less_than_or_equals(
        lhs: impl Into<LinearExpr>,
        rhs: impl Into<LinearExpr>,
    ) -> LinearConstraint {
        LinearConstraint {
            expression: lhs.into() - rhs.into(),
            relation: Relation::LessThanOrEqual,
            enforcement: None,
        }
    }

    /// Creates `lhs == rhs`.
    pub fn equals(lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> LinearConstraint {
        LinearConstraint {
            expression: lhs.into() - rhs.into(),
            relation: Relation::Equal,
            enforcement: None,
        }
    }

    /// Only enforce the constraint when `literal` is true.
    pub fn enforced_by(mut self, literal: impl Into<BoolLiteral>) -> LinearConstraint {
        self.enforcement = Some(literal.into());
        self
    }
}

/// The constraints a [`Model`](super::Model) can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelConstraint {
    Linear(LinearConstraint),
    /// `quotient == floor(numerator / divisor)` with a positive constant `divisor`.
    FloorDivision {
        quotient: IntVar,
        numerator: LinearExpr,
        divisor: i64,
        enforcement: Option<BoolLiteral>,
    },
    /// `target == factor` when `gate` is true and `target == 0` otherwise.
    GatedProduct {
        target: IntVar,
        factor: LinearExpr,
        gate: BoolVar,
    },
    /// At least one of the literals is true.
    Clause(Vec<BoolLiteral>),
    /// No two present intervals overlap.
    NoOverlap(Vec<IntervalVar>),
}

impl ModelConstraint {
    /// Checks the constraint against a complete assignment.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        let enforced = |enforcement: &Option<BoolLiteral>| {
            enforcement.is_none_or(|literal| assignment.literal(literal))
        };

        match self {
            ModelConstraint::Linear(constraint) => {
                if !enforced(&constraint.enforcement) {
                    return true;
                }

                let value = assignment.evaluate(&constraint.expression);
                match constraint.relation {
                    Relation::LessThanOrEqual => value <= 0,
                    Relation::Equal => value == 0,
                }
            }
            ModelConstraint::FloorDivision {
                quotient,
                numerator,
                divisor,
                enforcement,
            } => {
                !enforced(enforcement)
                    || assignment.value(*quotient)
                        == assignment.evaluate(numerator).div_euclid(*divisor)
            }
            ModelConstraint::GatedProduct {
                target,
                factor,
                gate,
            } => {
                let expected = if assignment.truth(*gate) {
                    assignment.evaluate(factor)
                } else {
                    0
                };
                assignment.value(*target) == expected
            }
            ModelConstraint::Clause(literals) => literals
                .iter()
                .any(|&literal| assignment.literal(literal)),
            ModelConstraint::NoOverlap(intervals) => intervals.iter().enumerate().all(|(i, a)| {
                intervals[i + 1..]
                    .iter()
                    .all(|b| !a.overlaps(b, assignment))
            }),
        }
    }
}

impl From<LinearConstraint> for ModelConstraint {
    fn from(constraint: LinearConstraint) -> Self {
        ModelConstraint::Linear(constraint)
    }
}
