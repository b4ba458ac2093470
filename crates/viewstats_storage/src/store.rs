//! Snapshot store trait definition.

use crate::error::StorageResult;
use std::sync::Arc;
use viewstats_event::Batch;

/// Durable single-slot storage for one pending batch.
///
/// # Invariants
///
/// - At most one snapshot exists at a time
/// - `save` is all-or-nothing from a reader's point of view
/// - `restore` empties the slot; a second `restore` returns an empty batch
/// - Saving an empty batch clears the slot, so an existing snapshot always
///   means undelivered views
///
/// # Implementors
///
/// - [`super::InMemorySnapshotStore`] - For testing
/// - [`super::FileSnapshotStore`] - For persistent storage
pub trait SnapshotStore: Send + Sync {
    /// Replaces the slot contents with `batch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be encoded or written.
    fn save(&self, batch: &Batch) -> StorageResult<()>;

    /// Takes the snapshot out of the slot.
    ///
    /// Returns an empty batch if the slot is empty. A snapshot that cannot
    /// be decoded is logged, removed and reported as empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if the slot cannot be read or cleared.
    fn restore(&self) -> StorageResult<Batch>;

    /// Reads the snapshot without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Corrupted`] if the snapshot cannot be
    /// decoded, or an I/O error if it cannot be read.
    fn peek(&self) -> StorageResult<Option<Batch>>;

    /// Removes the snapshot, returning true if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed.
    fn discard(&self) -> StorageResult<bool>;

    /// Returns true if the slot currently holds a snapshot.
    fn has_snapshot(&self) -> bool;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn save(&self, batch: &Batch) -> StorageResult<()> {
        (**self).save(batch)
    }

    fn restore(&self) -> StorageResult<Batch> {
        (**self).restore()
    }

    fn peek(&self) -> StorageResult<Option<Batch>> {
        (**self).peek()
    }

    fn discard(&self) -> StorageResult<bool> {
        (**self).discard()
    }

    fn has_snapshot(&self) -> bool {
        (**self).has_snapshot()
    }
}
