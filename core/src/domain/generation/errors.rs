use std::time::Duration;

use thiserror::Error;

/// Why a structured generation call did not produce a usable object.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("transport failure{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("cancelled by caller")]
    Cancelled,

    #[error("malformed output: {0}")]
    MalformedOutput(String),

    #[error("invalid shape: {0}")]
    InvalidShape(#[from] ShapeViolation),
}

/// First place where a model response departs from its schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{path}: expected {expected}, found {found}")]
pub struct ShapeViolation {
    pub path: String,
    pub expected: String,
    pub found: String,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl GenerationError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        GenerationError::Transport {
            status,
            message: message.into(),
        }
    }

    /// Network errors, timeouts, 408, 429 and 5xx are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Transport { status: None, .. } => true,
            GenerationError::Transport {
                status: Some(status),
                ..
            } => matches!(status, 408 | 429) || *status >= 500,
            GenerationError::Timeout(_) => true,
            GenerationError::Cancelled
            | GenerationError::MalformedOutput(_)
            | GenerationError::InvalidShape(_) => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Transport { .. } => "transport",
            GenerationError::Timeout(_) => "timeout",
            GenerationError::Cancelled => "cancelled",
            GenerationError::MalformedOutput(_) => "malformed_output",
            GenerationError::InvalidShape(_) => "invalid_shape",
        }
    }
}
