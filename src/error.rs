//! Error types shared by the forms, the screen state machine and the HTTP client.

use thiserror::Error;

/// Message shown to the user after any submission failure.
pub const FAILURE_NOTICE: &str =
    "Could not reach the backend. Check the backend connection and try again.";

/// Local input problems. These only ever disable submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be >= 0")]
    Negative { field: &'static str },

    #[error("{field} must be a whole number between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{field} must be at most {max}")]
    AboveMax { field: &'static str, max: u32 },

    #[error("both quiz questions must be answered")]
    Unanswered,
}

impl ValidationError {
    /// Same error, reported against another field name.
    pub(crate) fn for_field(self, name: &'static str) -> Self {
        match self {
            ValidationError::Empty { .. } => ValidationError::Empty { field: name },
            ValidationError::NotANumber { .. } => ValidationError::NotANumber { field: name },
            ValidationError::Negative { .. } => ValidationError::Negative { field: name },
            ValidationError::OutOfRange { min, max, .. } => ValidationError::OutOfRange {
                field: name,
                min,
                max,
            },
            ValidationError::AboveMax { max, .. } => ValidationError::AboveMax { field: name, max },
            ValidationError::Unanswered => ValidationError::Unanswered,
        }
    }
}

/// A failed round trip. Every variant is the same submission failure for the user.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend answered with HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(String),
}

impl SubmitError {
    pub fn notice(&self) -> &'static str {
        FAILURE_NOTICE
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Decode(err.to_string())
    }
}
