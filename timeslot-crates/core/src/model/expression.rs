use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use super::BoolVar;
use super::IntVar;

/// A variable which may appear in a [`LinearExpr`]; a boolean counts as `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Integer(IntVar),
    Boolean(BoolVar),
}

impl From<IntVar> for Operand {
    fn from(variable: IntVar) -> Self {
        Operand::Integer(variable)
    }
}

impl From<BoolVar> for Operand {
    fn from(variable: BoolVar) -> Self {
        Operand::Boolean(variable)
    }
}

/// The expression `sum(coefficient * operand) + offset`.
///
/// Expressions compose with `+`, `-`, unary `-` and scaling by an `i64`, e.g.
/// `LinearExpr::from(end) - start - 5`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(i64, Operand)>,
    offset: i64,
}

impl LinearExpr {
    pub fn constant(value: i64) -> LinearExpr {
        LinearExpr {
            terms: vec![],
            offset: value,
        }
    }

    pub fn term(coefficient: i64, operand: impl Into<Operand>) -> LinearExpr {
        LinearExpr {
            terms: vec![(coefficient, operand.into())],
            offset: 0,
        }
    }

    /// The sum of all `operands` with coefficient 1.
    pub fn sum<O: Into<Operand>>(operands: impl IntoIterator<Item = O>) -> LinearExpr {
        LinearExpr {
            terms: operands
                .into_iter()
                .map(|operand| (1, operand.into()))
                .collect(),
            offset: 0,
        }
    }

    pub fn terms(&self) -> &[(i64, Operand)] {
        &self.terms
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns `true` if the expression does not mention any variable.
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|&(coefficient, _)| coefficient == 0)
    }
}

impl From<IntVar> for LinearExpr {
    fn from(variable: IntVar) -> Self {
        LinearExpr::term(1, variable)
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(variable: BoolVar) -> Self {
        LinearExpr::term(1, variable)
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        LinearExpr::constant(value)
    }
}

impl<Rhs: Into<LinearExpr>> Add<Rhs> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: Rhs) -> Self::Output {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.offset += rhs.offset;
        self
    }
}

impl<Rhs: Into<LinearExpr>> Sub<Rhs> for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: Rhs) -> Self::Output {
        self + -rhs.into()
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, scale: i64) -> Self::Output {
        self.terms
            .iter_mut()
            .for_each(|(coefficient, _)| *coefficient *= scale);
        self.offset *= scale;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> Self::Output {
        self * -1
    }
}
