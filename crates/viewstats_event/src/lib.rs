//! # viewstats Event
//!
//! Page-view records, batches and the canonical JSON payload codec.
//!
//! This crate provides:
//! - [`PageView`] - one immutable logged occurrence
//! - [`Batch`] - an ordered group of page views (oldest first)
//! - [`Clock`] - the source of capture timestamps
//! - [`encode_batch`] / [`decode_batch`] - the single serializer used for
//!   both the collector request body and the on-disk snapshot
//!
//! ## Payload Shape
//!
//! ```text
//! { "pageViews": [ { "page": "<uuid>", "sessionId": "<uuid>", "timestamp": <epoch ms> } ] }
//! ```
//!
//! `timestamp` is always the absolute capture time in Unix epoch
//! milliseconds, on the wire and on disk alike.
//!
//! ## Usage
//!
//! ```
//! use viewstats_event::{decode_batch, encode_batch, Batch, PageView, SessionId, SubjectId};
//!
//! let session = SessionId::new();
//! let subject: SubjectId = "6c1b0f4e-8a57-4a0c-9c47-2f3e1f0b8d21".parse().unwrap();
//!
//! let mut batch = Batch::new();
//! batch.push(PageView::new(subject, session, 1_700_000_000_000));
//!
//! let bytes = encode_batch(&batch).unwrap();
//! let decoded = decode_batch(&bytes).unwrap();
//! assert_eq!(batch, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod clock;
mod error;
mod record;
mod wire;

pub use batch::Batch;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{EventError, EventResult};
pub use record::{PageView, SessionId, SubjectId};
pub use wire::{decode_batch, encode_batch, PageViewsPayload, WirePageView, PAGE_VIEWS_KEY};
