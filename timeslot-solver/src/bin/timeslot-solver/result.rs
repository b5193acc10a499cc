use std::path::Path;

use thiserror::Error;
use timeslot_solver::SchedulingError;

pub(crate) type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub(crate) enum SolverError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The request {0} could not be read: {1}")]
    InvalidRequest(String, serde_json::Error),
    #[error("Failed to write the schedule, more details: {0}")]
    Output(serde_json::Error),
    #[error("Failed to schedule the request, more details: {0}")]
    Scheduling(#[from] SchedulingError),
}

impl SolverError {
    pub(crate) fn invalid_request(source: Option<&Path>, error: serde_json::Error) -> Self {
        let source = source.map_or_else(
            || "on stdin".to_owned(),
            |path| format!("{}", path.display()),
        );
        Self::InvalidRequest(source, error)
    }
}
