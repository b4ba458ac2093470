//! # viewstats Storage
//!
//! Single-slot snapshot stores for batches that could not be delivered.
//!
//! A store holds **zero or one** snapshot. The snapshot's existence is the
//! only signal that events from an earlier run are still unresolved.
//!
//! ## Design Principles
//!
//! - `save` replaces the slot atomically; readers never see a partial file
//! - `restore` hands the snapshot back and empties the slot
//! - A corrupt snapshot is logged and dropped, never surfaced as a failure
//! - Stores are `Send + Sync`; each serializes its own slot access
//!
//! ## Available Stores
//!
//! - [`InMemorySnapshotStore`] - For testing and ephemeral trackers
//! - [`FileSnapshotStore`] - One JSON file in a cache directory
//!
//! ## Example
//!
//! ```rust
//! use viewstats_storage::{InMemorySnapshotStore, SnapshotStore};
//! use viewstats_event::Batch;
//!
//! let store = InMemorySnapshotStore::new();
//! store.save(&Batch::new()).unwrap();
//! assert!(store.restore().unwrap().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use file::{FileSnapshotStore, LOCK_FILE, SNAPSHOT_FILE};
pub use memory::InMemorySnapshotStore;
pub use store::SnapshotStore;
