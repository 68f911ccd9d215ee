use thiserror::Error;

use crate::domain::generation::errors::GenerationError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("Generation failed: {0}")]
    GenerationFailed(#[from] GenerationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,

    #[error("Feedback already submitted for this plan")]
    AlreadySubmitted,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// The underlying generation failure, if this error came from the model call.
    pub fn generation_error(&self) -> Option<&GenerationError> {
        match self {
            CoreError::GenerationFailed(e) => Some(e),
            _ => None,
        }
    }
}
