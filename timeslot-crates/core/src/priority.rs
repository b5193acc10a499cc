//! Fixed-point priority arithmetic.
//!
//! The priority of a task is its impact per unit of duration, scaled by [`DELAY_SCALE`] and
//! rounded down so that the model only contains integers.
use thiserror::Error;

use crate::Task;

/// The fixed-point scale used for both raw priorities and delay factors.
pub const DELAY_SCALE: i64 = 100;

/// The upper bound of a delay factor. It bounds the placement priority of a task which ends long
/// before its due date.
pub const MAX_DELAY: i64 = 10_000;

/// The lower bound of a delay factor: a task ending at its hard deadline has delay `-DELAY_SCALE`.
pub const MIN_DELAY: i64 = -DELAY_SCALE;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PriorityError {
    #[error("a priority needs a positive duration, got {0}")]
    NonPositiveDuration(i64),
    #[error("a priority needs a finite non-negative impact, got {0}")]
    InvalidImpact(f64),
    #[error("the priority of impact {impact} over duration {duration} does not fit in 32 bits")]
    OutOfRange { impact: f64, duration: i64 },
    #[error("the maximum priority of an empty task set is undefined")]
    NoTasks,
}

/// Computes `floor(impact * DELAY_SCALE / duration)`.
pub fn raw_priority(impact: f64, duration: i64) -> Result<i64, PriorityError> {
    if duration <= 0 {
        return Err(PriorityError::NonPositiveDuration(duration));
    }
    if !impact.is_finite() || impact < 0.0 {
        return Err(PriorityError::InvalidImpact(impact));
    }

    let priority = (impact * DELAY_SCALE as f64 / duration as f64).floor();
    if priority > f64::from(i32::MAX) {
        return Err(PriorityError::OutOfRange { impact, duration });
    }

    Ok(priority as i64)
}

/// The largest raw priority over `tasks`; it sizes the domains of the per-task priority variables.
pub fn max_raw_priority<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
) -> Result<i64, PriorityError> {
    let mut max: Option<i64> = None;
    for task in tasks {
        let priority = raw_priority(task.impact(), task.duration)?;
        max = Some(max.map_or(priority, |max| max.max(priority)));
    }

    max.ok_or(PriorityError::NoTasks)
}
