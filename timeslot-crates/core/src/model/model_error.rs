use thiserror::Error;

use crate::TaskId;

/// Errors raised while building a [`Model`](super::Model) which indicate a structurally broken
/// instance rather than a merely infeasible one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("task {id} with duration {duration} does not fit in the window [{window_start}, {window_end}]")]
    DurationExceedsWindow {
        id: TaskId,
        duration: i64,
        window_start: i64,
        window_end: i64,
    },

    #[error("variable '{name}' has an empty domain [{lower_bound}, {upper_bound}]")]
    EmptyDomain {
        name: String,
        lower_bound: i64,
        upper_bound: i64,
    },

    #[error("floor division by non-positive divisor {0}")]
    NonPositiveDivisor(i64),
}
