//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use uuid::Uuid;
use viewstats_event::{Batch, PageView, SessionId, SubjectId};

/// Start time used for generated views (Unix epoch millis).
pub const START_MILLIS: u64 = 1_700_000_000_000;

/// Generate `count` random subject ids.
pub fn generate_subjects(count: usize) -> Vec<SubjectId> {
    (0..count)
        .map(|_| SubjectId::from_uuid(Uuid::new_v4()))
        .collect()
}

/// Generate a batch of `count` views from one session.
pub fn generate_batch(count: usize) -> Batch {
    let session = SessionId::new();
    generate_subjects(count)
        .into_iter()
        .enumerate()
        .map(|(i, subject)| PageView::new(subject, session, START_MILLIS + i as u64))
        .collect()
}
