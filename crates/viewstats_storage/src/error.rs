//! Error types for snapshot storage.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or writing the snapshot slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The batch could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] viewstats_event::EventError),

    /// The snapshot exists but cannot be decoded.
    #[error("snapshot corrupted: {0}")]
    Corrupted(String),

    /// Another process owns the cache directory.
    #[error("snapshot directory locked: another process has exclusive access")]
    Locked,
}
