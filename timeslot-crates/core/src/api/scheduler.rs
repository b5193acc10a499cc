use log::info;

use super::SchedulerOptions;
use super::SchedulingResult;
use crate::engine::PumpkinEngine;
use crate::engine::SolvingEngine;
use crate::formulation::SchedulingModel;
use crate::lexicographic::LexicographicOutcome;
use crate::lexicographic::LexicographicSolver;
use crate::results::Schedule;
use crate::ScheduleRequest;

/// Handles [`ScheduleRequest`]s: validation, model building, the two optimisation phases and
/// result assembly.
///
/// Every request gets a fresh model, so a scheduler can be reused for independent requests.
#[derive(Debug)]
pub struct Scheduler<E = PumpkinEngine> {
    options: SchedulerOptions,
    engine: E,
}

impl Scheduler<PumpkinEngine> {
    pub fn new(options: SchedulerOptions) -> Scheduler<PumpkinEngine> {
        Scheduler::with_engine(options, PumpkinEngine)
    }
}

impl<E: SolvingEngine> Scheduler<E> {
    pub fn with_engine(options: SchedulerOptions, engine: E) -> Scheduler<E> {
        Scheduler { options, engine }
    }

    /// Schedules the tasks of `request`.
    ///
    /// A request without tasks is trivially solved. When either optimisation phase ends without a
    /// solution the returned schedule is not `found`.
    pub fn schedule(&mut self, request: &ScheduleRequest) -> SchedulingResult<Schedule> {
        request.validate()?;

        if request.tasks.is_empty() {
            info!("Request without tasks");
            return Ok(Schedule::empty());
        }

        info!(
            "Scheduling {} tasks with {} reserved intervals and {} reserved tag intervals",
            request.tasks.len(),
            request.reserved_intervals.len(),
            request.reserved_tags.len()
        );

        let mut scheduling = SchedulingModel::build(request)?;
        let outcome = LexicographicSolver::new(&mut self.engine, self.options.limits())
            .solve(&mut scheduling)?;

        match outcome {
            LexicographicOutcome::Solved(solution) => {
                info!(
                    "Scheduled with total raw priority {} and total priority {}",
                    solution.total_raw_priority, solution.total_priority
                );
                Ok(Schedule::assemble(request, &scheduling, &solution))
            }
            LexicographicOutcome::NoSolution { phase, status } => {
                info!("No schedule found: {phase} phase ended {status:?}");
                Ok(Schedule::not_found())
            }
        }
    }
}
