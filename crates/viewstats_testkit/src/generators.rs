//! Property-based test generators using proptest.
//!
//! Provides strategies for generating page views and batches that satisfy
//! the tracker's invariants.

use proptest::prelude::*;
use uuid::Uuid;
use viewstats_delivery::Outcome;
use viewstats_event::{Batch, PageView, SessionId, SubjectId};

/// Strategy for generating subject ids.
pub fn subject_id_strategy() -> impl Strategy<Value = SubjectId> {
    any::<u128>().prop_map(|bits| SubjectId::from_uuid(Uuid::from_u128(bits)))
}

/// Strategy for generating subject ids in textual form.
pub fn subject_text_strategy() -> impl Strategy<Value = String> {
    subject_id_strategy().prop_map(|id| id.to_string())
}

/// Strategy for generating strings that are not UUIDs.
pub fn invalid_subject_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z/_-]{0,24}")
        .expect("Invalid regex")
        .prop_filter("Must not parse as a UUID", |s| Uuid::parse_str(s).is_err())
}

/// Strategy for generating a page view captured within `window_millis`
/// after `start_millis`.
pub fn page_view_strategy(
    session: SessionId,
    start_millis: u64,
    window_millis: u64,
) -> impl Strategy<Value = PageView> {
    (subject_id_strategy(), 0..=window_millis)
        .prop_map(move |(subject, offset)| PageView::new(subject, session, start_millis + offset))
}

/// Strategy for generating batches of up to `max_len` views in capture
/// order, all from one session.
pub fn batch_strategy(max_len: usize) -> impl Strategy<Value = Batch> {
    (
        prop::collection::vec((subject_id_strategy(), 0u64..5_000), 0..=max_len),
        0u64..=4_000_000_000_000,
    )
        .prop_map(|(steps, start)| {
            let session = SessionId::new();
            let mut at = start;
            steps
                .into_iter()
                .map(|(subject, gap)| {
                    at += gap;
                    PageView::new(subject, session, at)
                })
                .collect()
        })
}

/// Strategy for generating collector response statuses across every
/// outcome class.
pub fn status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(200u16),
        Just(204u16),
        Just(206u16),
        Just(400u16),
        Just(422u16),
        Just(404u16),
        Just(429u16),
        500u16..=599,
    ]
}

/// Strategy for generating a status together with its expected outcome.
pub fn status_outcome_strategy() -> impl Strategy<Value = (u16, Outcome)> {
    status_strategy().prop_map(|status| {
        let outcome = match status {
            206 => Outcome::PartiallyAccepted,
            200..=299 => Outcome::Accepted,
            400 | 422 => Outcome::Rejected,
            _ => Outcome::TransientFailure,
        };
        (status, outcome)
    })
}
