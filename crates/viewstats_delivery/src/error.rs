//! Error types for delivery.

use thiserror::Error;

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Errors raised by an [`crate::HttpClient`] before a status code is known.
///
/// All of these classify as [`crate::Outcome::TransientFailure`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The connect or read deadline passed.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The exchange failed after connecting.
    #[error("I/O error: {0}")]
    Io(String),

    /// The HTTP client could not be built.
    #[error("client setup failed: {0}")]
    ClientSetup(String),
}

impl DeliveryError {
    /// Returns true if the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DeliveryError::Timeout)
    }
}
