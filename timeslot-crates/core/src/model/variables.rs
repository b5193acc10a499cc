use std::ops::Not;

/// An integer decision variable of a [`Model`](super::Model).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(pub(crate) usize);

impl IntVar {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A boolean decision variable of a [`Model`](super::Model).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(pub(crate) usize);

impl BoolVar {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A [`BoolVar`] or its negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoolLiteral {
    variable: BoolVar,
    positive: bool,
}

impl BoolLiteral {
    pub fn variable(self) -> BoolVar {
        self.variable
    }

    pub fn is_positive(self) -> bool {
        self.positive
    }
}

impl From<BoolVar> for BoolLiteral {
    fn from(variable: BoolVar) -> Self {
        BoolLiteral {
            variable,
            positive: true,
        }
    }
}

impl Not for BoolLiteral {
    type Output = BoolLiteral;

    fn not(self) -> Self::Output {
        BoolLiteral {
            variable: self.variable,
            positive: !self.positive,
        }
    }
}

impl Not for BoolVar {
    type Output = BoolLiteral;

    fn not(self) -> Self::Output {
        !BoolLiteral::from(self)
    }
}

/// The bounds and name of an [`IntVar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerDomain {
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub name: String,
}
