use thiserror::Error;

/// Failures of a [`SolvingEngine`](super::SolvingEngine) which are not a verdict about the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("the time budget was exhausted before any solution was found")]
    TimeBudgetExhausted,

    #[error("solving was interrupted before any solution was found")]
    Interrupted,

    #[error("{context} has magnitude {magnitude} which exceeds the 32-bit range of the engine")]
    ValueOutOfRange { context: String, magnitude: i128 },
}
