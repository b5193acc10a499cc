use super::Assignment;
use super::BoolVar;
use super::IntVar;
use super::LinearExpr;

/// The half-open span `[start, start + size)`, which only occupies the timeline when its presence
/// literal is true. An interval without presence literal is always present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalVar {
    start: LinearExpr,
    size: i64,
    presence: Option<BoolVar>,
}

impl IntervalVar {
    /// A mandatory interval at a fixed position, e.g. a reserved window.
    pub fn fixed(start: i64, end: i64) -> IntervalVar {
        IntervalVar {
            start: LinearExpr::constant(start),
            size: end - start,
            presence: None,
        }
    }

    /// An interval starting at `start` which is only present when `presence` is true.
    pub fn optional(start: IntVar, size: i64, presence: BoolVar) -> IntervalVar {
        IntervalVar {
            start: start.into(),
            size,
            presence: Some(presence),
        }
    }

    pub fn start(&self) -> &LinearExpr {
        &self.start
    }

    pub fn end(&self) -> LinearExpr {
        self.start.clone() + self.size
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn presence(&self) -> Option<BoolVar> {
        self.presence
    }

    /// Returns `true` if the interval is mandatory and does not depend on any variable.
    pub fn is_fixed(&self) -> bool {
        self.presence.is_none() && self.start.is_constant()
    }

    pub fn is_present(&self, assignment: &Assignment) -> bool {
        self.presence.is_none_or(|presence| assignment.truth(presence))
    }

    /// Returns `true` if both intervals are present and share at least one time point.
    pub fn overlaps(&self, other: &IntervalVar, assignment: &Assignment) -> bool {
        if !self.is_present(assignment) || !other.is_present(assignment) {
            return false;
        }

        assignment.evaluate(&self.start) < assignment.evaluate(&other.end())
            && assignment.evaluate(&other.start) < assignment.evaluate(&self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let assignment = Assignment::new(vec![5], vec![true]);
        let task = IntervalVar::optional(IntVar(0), 3, BoolVar(0));

        assert!(!task.overlaps(&IntervalVar::fixed(0, 5), &assignment));
        assert!(!task.overlaps(&IntervalVar::fixed(8, 10), &assignment));
        assert!(task.overlaps(&IntervalVar::fixed(7, 10), &assignment));
        assert!(task.overlaps(&IntervalVar::fixed(0, 6), &assignment));
    }

    #[test]
    fn absent_intervals_never_overlap() {
        let assignment = Assignment::new(vec![5], vec![false]);
        let task = IntervalVar::optional(IntVar(0), 3, BoolVar(0));

        assert!(!task.overlaps(&IntervalVar::fixed(0, 10), &assignment));
    }

    #[test]
    fn fixed_intervals_are_recognised() {
        assert!(IntervalVar::fixed(0, 4).is_fixed());
        assert!(!IntervalVar::optional(IntVar(0), 3, BoolVar(0)).is_fixed());
    }
}
