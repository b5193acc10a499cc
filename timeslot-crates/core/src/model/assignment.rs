use super::BoolLiteral;
use super::BoolVar;
use super::IntVar;
use super::LinearExpr;
use super::Operand;

/// A value for every variable of a [`Model`](super::Model), as reported by a solving engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    integers: Vec<i64>,
    booleans: Vec<bool>,
}

impl Assignment {
    /// Creates an assignment where `integers[i]` is the value of the integer variable with index
    /// `i`, and likewise for `booleans`.
    pub fn new(integers: Vec<i64>, booleans: Vec<bool>) -> Assignment {
        Assignment { integers, booleans }
    }

    pub fn value(&self, variable: IntVar) -> i64 {
        self.integers[variable.index()]
    }

    pub fn truth(&self, variable: BoolVar) -> bool {
        self.booleans[variable.index()]
    }

    pub fn literal(&self, literal: BoolLiteral) -> bool {
        self.truth(literal.variable()) == literal.is_positive()
    }

    pub fn operand(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Integer(variable) => self.value(variable),
            Operand::Boolean(variable) => i64::from(self.truth(variable)),
        }
    }

    pub fn evaluate(&self, expression: &LinearExpr) -> i64 {
        expression
            .terms()
            .iter()
            .map(|&(coefficient, operand)| coefficient * self.operand(operand))
            .sum::<i64>()
            + expression.offset()
    }

    pub fn num_integers(&self) -> usize {
        self.integers.len()
    }

    pub fn num_booleans(&self) -> usize {
        self.booleans.len()
    }
}
