use std::time::Duration;

use crate::engine::Interrupt;
use crate::engine::SolveLimits;

/// The options of a [`Scheduler`](super::Scheduler).
#[derive(Clone, Debug, Default)]
pub struct SchedulerOptions {
    /// The wall-clock budget of each of the two optimisation phases.
    pub time_limit: Option<Duration>,
    /// Cancels in-flight solving when triggered.
    pub interrupt: Option<Interrupt>,
}

impl SchedulerOptions {
    pub(crate) fn limits(&self) -> SolveLimits {
        SolveLimits {
            time_budget: self.time_limit,
            interrupt: self.interrupt.clone(),
        }
    }
}
