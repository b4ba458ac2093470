//! # viewstats Testkit
//!
//! Test utilities for viewstats.
//!
//! This crate provides:
//! - Fixtures: temporary snapshot stores, a scriptable fake collector and
//!   a tracker harness driven by a manual clock
//! - Property-based test generators using proptest
//! - Stress helpers for concurrent recording
//!
//! ## Usage
//!
//! ```rust
//! use viewstats_testkit::prelude::*;
//!
//! let harness = TrackerHarness::new();
//! let store = TestStore::new();
//! let tracker = harness.tracker(TrackerConfig::default(), store.open());
//!
//! for id in subject_ids(3) {
//!     tracker.record(&id).unwrap();
//! }
//! tracker.on_background();
//! tracker.wait_idle();
//!
//! assert_eq!(harness.collector.delivered_events(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
    pub use viewstats_core::{FlushPolicy, Tracker, TrackerConfig, TrackerState};
    pub use viewstats_delivery::{MockReply, Outcome};
    pub use viewstats_event::{Batch, PageView, SessionId, SubjectId};
    pub use viewstats_storage::SnapshotStore;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
