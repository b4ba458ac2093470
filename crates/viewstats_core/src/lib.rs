//! # viewstats Core
//!
//! Batches page views in memory and ships them to a collector without ever
//! blocking or failing the caller over delivery problems.
//!
//! ## Lifecycle
//!
//! ```text
//! setup ──► restore snapshot ──► record ... record ──► policy fires ──► flush
//!                                                                        │
//!                         ┌──────────── worker thread ◄──────────────────┘
//!                         ▼
//!                   DeliveryClient::send
//!                         │
//!        Accepted / PartiallyAccepted / Rejected ──► discard
//!        TransientFailure ──────────────────────────► save snapshot
//! ```
//!
//! A flush fires when the buffer holds more than
//! [`FlushPolicy::max_count`] views, when its oldest view is older than
//! [`FlushPolicy::max_age`], or unconditionally on
//! [`Tracker::on_background`]. Saved snapshots are merged into the buffer
//! by the next [`Tracker::setup`], so retries happen once per process
//! start rather than on a timer.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use viewstats_core::{Tracker, TrackerConfig};
//! use viewstats_delivery::{DeliveryClient, DeliveryConfig, MockHttpClient};
//! use viewstats_storage::InMemorySnapshotStore;
//!
//! let collector = Arc::new(MockHttpClient::new());
//! let delivery = DeliveryClient::new(
//!     DeliveryConfig::new("https://collector.example.com/views"),
//!     Arc::clone(&collector),
//! );
//! let tracker = Tracker::setup(
//!     TrackerConfig::default(),
//!     delivery,
//!     InMemorySnapshotStore::new(),
//! )
//! .unwrap();
//!
//! tracker.record("6c1b0f4e-8a57-4a0c-9c47-2f3e1f0b8d21").unwrap();
//! tracker.on_background();
//! tracker.wait_idle();
//!
//! assert_eq!(collector.received_batches()[0].len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod state;
mod tracker;
mod worker;

pub use buffer::BatchBuffer;
pub use config::{FlushPolicy, TrackerConfig, DEFAULT_MAX_AGE, DEFAULT_MAX_COUNT};
pub use error::{CoreError, CoreResult};
pub use state::{TrackerState, TrackerStats};
pub use tracker::Tracker;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export the types callers need to wire a tracker together.
pub use viewstats_delivery::{DeliveryClient, DeliveryConfig, HttpClient, Outcome};
pub use viewstats_event::{Clock, SessionId, SubjectId, SystemClock};
pub use viewstats_storage::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};
