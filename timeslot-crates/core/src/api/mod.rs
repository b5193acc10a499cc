mod options;
mod scheduler;
mod scheduling_error;

pub use options::SchedulerOptions;
pub use scheduler::Scheduler;
pub use scheduling_error::SchedulingError;
pub use scheduling_error::SchedulingResult;

pub use crate::results::Schedule;
pub use crate::results::ScheduledTask;
