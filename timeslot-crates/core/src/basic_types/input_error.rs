use thiserror::Error;

use super::TaskId;

/// Errors caused by a malformed [`ScheduleRequest`](super::ScheduleRequest).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("task {id} has a non-positive duration {duration}")]
    NonPositiveDuration { id: TaskId, duration: i64 },

    #[error("task {id} has an impact {impact} which is negative or not finite")]
    InvalidImpact { id: TaskId, impact: f64 },

    #[error("task {id} has maxDueDate {max_due_date} before its dueDate {due_date}")]
    MaxDueDateBeforeDueDate {
        id: TaskId,
        due_date: i64,
        max_due_date: i64,
    },

    #[error("task {id} has an empty tag")]
    EmptyTaskTag { id: TaskId },

    #[error("task id {0} occurs more than once")]
    DuplicateId(TaskId),

    #[error("reserved interval [{start}, {end}) is empty or inverted")]
    EmptyInterval { start: i64, end: i64 },

    #[error("reserved tag interval [{start}, {end}) has an empty tag")]
    EmptyIntervalTag { start: i64, end: i64 },
}
