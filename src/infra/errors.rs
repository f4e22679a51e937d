// src/infra/errors.rs — Error types for wozeval

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WozEvalError {
    // Statistical degeneracy (recoverable once more samples arrive)
    #[error("degenerate weight: {0}")]
    DegenerateWeight(String),

    #[error("assignment missing required variable '{0}'")]
    InconsistentAssignment(String),

    #[error("empty sample population")]
    EmptyPopulation,

    // Infra
    #[error("configuration error: {0}")]
    Config(String),
}

impl WozEvalError {
    /// Whether a later pass over a grown or repaired population could
    /// succeed. Configuration and IO problems will not fix themselves.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WozEvalError::DegenerateWeight(_)
                | WozEvalError::InconsistentAssignment(_)
                | WozEvalError::EmptyPopulation
        )
    }
}
