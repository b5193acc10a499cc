//! Two-phase lexicographic optimisation.
//!
//! The first phase maximises the total raw priority of the admitted tasks. Its admission
//! decisions and objective value are then frozen into the model, and the second phase maximises
//! the total placement priority. The objectives are never combined into a weighted sum.
use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;
use log::warn;

use crate::engine::EngineError;
use crate::engine::SolveLimits;
use crate::engine::SolveOutcome;
use crate::engine::SolveStatus;
use crate::engine::SolvingEngine;
use crate::engine::StopReason;
use crate::formulation::SchedulingModel;
use crate::model::Assignment;
use crate::model::IntVar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Maximise the total raw priority.
    Admission,
    /// Maximise the total priority with the admission frozen.
    Refinement,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Admission => write!(f, "admission"),
            Phase::Refinement => write!(f, "refinement"),
        }
    }
}

/// The final assignment of a successful lexicographic solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexicographicSolution {
    pub assignment: Assignment,
    pub total_raw_priority: i64,
    pub total_priority: i64,
    pub admission_proven_optimal: bool,
    pub refinement_proven_optimal: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexicographicOutcome {
    Solved(LexicographicSolution),
    /// The given phase ended without a solution.
    NoSolution { phase: Phase, status: SolveStatus },
}

/// Runs the two phases on a [`SchedulingModel`] with one [`SolvingEngine`].
#[derive(Debug)]
pub struct LexicographicSolver<E> {
    engine: E,
    limits: SolveLimits,
}

impl<E: SolvingEngine> LexicographicSolver<E> {
    /// Every phase gets the full `limits`.
    pub fn new(engine: E, limits: SolveLimits) -> LexicographicSolver<E> {
        LexicographicSolver { engine, limits }
    }

    /// Solves both phases. The admission of the first phase is frozen into `scheduling`, so the
    /// model is left constrained by it.
    ///
    /// An engine which stops on a limit before finding any solution results in an
    /// [`EngineError`]; an infeasible or otherwise unknown phase is reported as
    /// [`LexicographicOutcome::NoSolution`].
    pub fn solve(
        &mut self,
        scheduling: &mut SchedulingModel,
    ) -> Result<LexicographicOutcome, EngineError> {
        let (admission, admission_proven_optimal) = match self.run_phase(
            Phase::Admission,
            scheduling,
            scheduling.total_raw_priority(),
        )? {
            PhaseResult::Solved {
                assignment,
                proven_optimal,
            } => (assignment, proven_optimal),
            PhaseResult::Failed(status) => {
                return Ok(LexicographicOutcome::NoSolution {
                    phase: Phase::Admission,
                    status,
                })
            }
        };

        scheduling.freeze_admission(&admission);

        let (refinement, refinement_proven_optimal) = match self.run_phase(
            Phase::Refinement,
            scheduling,
            scheduling.total_priority(),
        )? {
            PhaseResult::Solved {
                assignment,
                proven_optimal,
            } => (assignment, proven_optimal),
            PhaseResult::Failed(status) => {
                return Ok(LexicographicOutcome::NoSolution {
                    phase: Phase::Refinement,
                    status,
                })
            }
        };

        Ok(LexicographicOutcome::Solved(LexicographicSolution {
            total_raw_priority: refinement.value(scheduling.total_raw_priority()),
            total_priority: refinement.value(scheduling.total_priority()),
            assignment: refinement,
            admission_proven_optimal,
            refinement_proven_optimal,
        }))
    }

    fn run_phase(
        &mut self,
        phase: Phase,
        scheduling: &SchedulingModel,
        objective: IntVar,
    ) -> Result<PhaseResult, EngineError> {
        let outcome = self
            .engine
            .solve(scheduling.model(), objective, &self.limits)?;

        match outcome {
            SolveOutcome::Optimal(assignment) => {
                debug!(
                    "Phase {phase}: optimal with objective {}",
                    assignment.value(objective)
                );
                Ok(PhaseResult::Solved {
                    assignment,
                    proven_optimal: true,
                })
            }
            SolveOutcome::Feasible(assignment) => {
                warn!(
                    "Phase {phase}: stopped before proving optimality, objective {}",
                    assignment.value(objective)
                );
                Ok(PhaseResult::Solved {
                    assignment,
                    proven_optimal: false,
                })
            }
            SolveOutcome::Infeasible => {
                debug!("Phase {phase}: infeasible");
                Ok(PhaseResult::Failed(SolveStatus::Infeasible))
            }
            SolveOutcome::Unknown(Some(StopReason::TimeBudget)) => {
                warn!("Phase {phase}: time budget exhausted without a solution");
                Err(EngineError::TimeBudgetExhausted)
            }
            SolveOutcome::Unknown(Some(StopReason::Interrupted)) => {
                warn!("Phase {phase}: interrupted without a solution");
                Err(EngineError::Interrupted)
            }
            SolveOutcome::Unknown(None) => {
                debug!("Phase {phase}: unknown");
                Ok(PhaseResult::Failed(SolveStatus::Unknown))
            }
        }
    }
}

enum PhaseResult {
    Solved {
        assignment: Assignment,
        proven_optimal: bool,
    },
    Failed(SolveStatus),
}
