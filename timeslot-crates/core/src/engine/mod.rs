//! The seam between the scheduling core and a constraint solver.
//!
//! A [`SolvingEngine`] maximises one integer variable of a [`Model`] and reports a
//! [`SolveOutcome`]. The model is append-only, so an engine may be invoked repeatedly on the same
//! model as constraints are added between calls. [`PumpkinEngine`] is the default implementation.
mod engine_error;
mod limits;
mod pumpkin;

pub use engine_error::EngineError;
pub use limits::Interrupt;
pub use limits::LimitTracker;
pub use limits::SolveLimits;
pub use limits::StopReason;
pub use pumpkin::PumpkinEngine;

use crate::model::Assignment;
use crate::model::IntVar;
use crate::model::Model;

/// The verdict of a single engine invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// A solution was found and proven to be optimal.
    Optimal,
    /// A solution was found, but the search stopped before proving optimality.
    Feasible,
    /// The model has no solution.
    Infeasible,
    /// The search stopped before finding any solution.
    Unknown,
}

/// The result of [`SolvingEngine::solve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Optimal(Assignment),
    Feasible(Assignment),
    Infeasible,
    /// Nothing is known; the payload records which limit stopped the search, if any.
    Unknown(Option<StopReason>),
}

impl SolveOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            SolveOutcome::Optimal(_) => SolveStatus::Optimal,
            SolveOutcome::Feasible(_) => SolveStatus::Feasible,
            SolveOutcome::Infeasible => SolveStatus::Infeasible,
            SolveOutcome::Unknown(_) => SolveStatus::Unknown,
        }
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            SolveOutcome::Optimal(assignment) | SolveOutcome::Feasible(assignment) => {
                Some(assignment)
            }
            SolveOutcome::Infeasible | SolveOutcome::Unknown(_) => None,
        }
    }
}

/// A constraint solver which can maximise an objective over a [`Model`].
pub trait SolvingEngine {
    /// Maximises `objective` subject to every constraint in `model`.
    ///
    /// The search respects `limits`. When a limit triggers after a solution has been found, the
    /// best solution so far is returned as [`SolveOutcome::Feasible`].
    fn solve(
        &mut self,
        model: &Model,
        objective: IntVar,
        limits: &SolveLimits,
    ) -> Result<SolveOutcome, EngineError>;
}

impl<E: SolvingEngine + ?Sized> SolvingEngine for &mut E {
    fn solve(
        &mut self,
        model: &Model,
        objective: IntVar,
        limits: &SolveLimits,
    ) -> Result<SolveOutcome, EngineError> {
        (**self).solve(model, objective, limits)
    }
}

impl<E: SolvingEngine + ?Sized> SolvingEngine for Box<E> {
    fn solve(
        &mut self,
        model: &Model,
        objective: IntVar,
        limits: &SolveLimits,
    ) -> Result<SolveOutcome, EngineError> {
        (**self).solve(model, objective, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_assignment_accessors() {
        let assignment = Assignment::new(vec![1], vec![]);

        let optimal = SolveOutcome::Optimal(assignment.clone());
        let feasible = SolveOutcome::Feasible(assignment.clone());

        assert_eq!(optimal.status(), SolveStatus::Optimal);
        assert_eq!(feasible.status(), SolveStatus::Feasible);
        assert_eq!(optimal.assignment(), Some(&assignment));
        assert_eq!(SolveOutcome::Infeasible.assignment(), None);
        assert_eq!(
            SolveOutcome::Unknown(Some(StopReason::TimeBudget)).status(),
            SolveStatus::Unknown
        );
        assert_eq!(feasible.assignment(), Some(&assignment));
    }
}
