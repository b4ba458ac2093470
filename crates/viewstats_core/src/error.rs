//! Error types for the tracker.

use thiserror::Error;
use viewstats_event::EventError;
use viewstats_storage::StorageError;

/// Result type for tracker operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the tracker.
///
/// Delivery problems never appear here; they are classified into an
/// outcome and handled in the background.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The view could not be built, e.g. the subject id is not a UUID.
    #[error("invalid page view: {0}")]
    Event(#[from] EventError),

    /// The snapshot store could not be opened or read.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The flush worker thread could not be started.
    #[error("failed to start flush worker: {0}")]
    Worker(#[from] std::io::Error),
}
