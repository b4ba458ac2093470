//! Error types for the event crate.

use thiserror::Error;

/// Result type for event operations.
pub type EventResult<T> = Result<T, EventError>;

/// Errors that can occur while building or (de)serializing page views.
#[derive(Error, Debug)]
pub enum EventError {
    /// A subject identifier could not be parsed.
    #[error("invalid subject id {value:?}: {reason}")]
    InvalidSubjectId {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A session identifier could not be parsed.
    #[error("invalid session id {value:?}: {reason}")]
    InvalidSessionId {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EventError {
    /// Creates an invalid subject id error.
    pub fn invalid_subject(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidSubjectId {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an invalid session id error.
    pub fn invalid_session(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidSessionId {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
