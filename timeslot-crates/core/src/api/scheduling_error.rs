use thiserror::Error;

use crate::engine::EngineError;
use crate::model::ModelError;
use crate::priority::PriorityError;
use crate::InputError;

pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Every way a scheduling request can fail. A request without a feasible schedule is not an
/// error; it yields a [`Schedule`](crate::Schedule) which is not `found`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("invalid request: {0}")]
    Input(#[from] InputError),
    #[error("invalid priority: {0}")]
    Priority(#[from] PriorityError),
    #[error("invalid model: {0}")]
    Model(#[from] ModelError),
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),
}

impl SchedulingError {
    /// Returns `true` if the request itself was at fault, as opposed to the engine.
    pub fn is_rejected_request(&self) -> bool {
        !matches!(self, SchedulingError::Engine(_))
    }
}
