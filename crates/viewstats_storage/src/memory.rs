//! In-memory snapshot store for testing.

use crate::error::{StorageError, StorageResult};
use crate::store::SnapshotStore;
use parking_lot::RwLock;
use tracing::warn;
use viewstats_event::{decode_batch, encode_batch, Batch};

/// An in-memory snapshot store.
///
/// The slot holds the encoded payload bytes rather than the batch itself,
/// so the same codec path as the file store is exercised.
///
/// # Example
///
/// ```rust
/// use viewstats_storage::{InMemorySnapshotStore, SnapshotStore};
///
/// let store = InMemorySnapshotStore::with_data(b"not json".to_vec());
/// assert!(store.has_snapshot());
/// assert!(store.restore().unwrap().is_empty());
/// assert!(!store.has_snapshot());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<Vec<u8>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose slot already holds `data`.
    ///
    /// Useful for testing recovery from arbitrary (including corrupt) bytes.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            slot: RwLock::new(Some(data)),
        }
    }

    /// Returns a copy of the raw slot bytes.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.slot.read().clone()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, batch: &Batch) -> StorageResult<()> {
        if batch.is_empty() {
            *self.slot.write() = None;
            return Ok(());
        }
        let data = encode_batch(batch)?;
        *self.slot.write() = Some(data);
        Ok(())
    }

    fn restore(&self) -> StorageResult<Batch> {
        let Some(data) = self.slot.write().take() else {
            return Ok(Batch::new());
        };

        match decode_batch(&data) {
            Ok(batch) => Ok(batch),
            Err(e) => {
                warn!(error = %e, bytes = data.len(), "discarding corrupt snapshot");
                Ok(Batch::new())
            }
        }
    }

    fn peek(&self) -> StorageResult<Option<Batch>> {
        match self.slot.read().as_deref() {
            Some(data) => decode_batch(data)
                .map(Some)
                .map_err(|e| StorageError::Corrupted(e.to_string())),
            None => Ok(None),
        }
    }

    fn discard(&self) -> StorageResult<bool> {
        Ok(self.slot.write().take().is_some())
    }

    fn has_snapshot(&self) -> bool {
        self.slot.read().is_some()
    }
}
