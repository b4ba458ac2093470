//! Canonical JSON payload codec.
//!
//! One serializer serves both the collector request body and the persisted
//! snapshot, so a batch that is retried after a restart is byte-for-byte the
//! payload it would have been the first time.

use crate::batch::Batch;
use crate::error::{EventError, EventResult};
use crate::record::{PageView, SessionId, SubjectId};
use serde::{Deserialize, Serialize};

/// Top-level key of the payload object.
pub const PAGE_VIEWS_KEY: &str = "pageViews";

/// The payload document: `{ "pageViews": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewsPayload {
    /// Page views, oldest first.
    #[serde(rename = "pageViews")]
    pub page_views: Vec<WirePageView>,
}

/// One page view as it appears in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePageView {
    /// Subject id in hyphenated UUID form.
    pub page: String,
    /// Session id in hyphenated UUID form.
    pub session_id: String,
    /// Capture time in Unix epoch milliseconds.
    pub timestamp: u64,
}

impl From<&PageView> for WirePageView {
    fn from(view: &PageView) -> Self {
        Self {
            page: view.subject().to_string(),
            session_id: view.session().to_string(),
            timestamp: view.captured_at(),
        }
    }
}

impl TryFrom<WirePageView> for PageView {
    type Error = EventError;

    fn try_from(wire: WirePageView) -> Result<Self, Self::Error> {
        let subject = SubjectId::parse(&wire.page)?;
        let session = SessionId::parse(&wire.session_id)?;
        Ok(PageView::new(subject, session, wire.timestamp))
    }
}

impl From<&Batch> for PageViewsPayload {
    fn from(batch: &Batch) -> Self {
        Self {
            page_views: batch.iter().map(WirePageView::from).collect(),
        }
    }
}

impl TryFrom<PageViewsPayload> for Batch {
    type Error = EventError;

    fn try_from(payload: PageViewsPayload) -> Result<Self, Self::Error> {
        payload
            .page_views
            .into_iter()
            .map(PageView::try_from)
            .collect()
    }
}

/// Encodes a batch to the payload JSON bytes.
///
/// # Errors
///
/// Returns [`EventError::Json`] if serialization fails.
pub fn encode_batch(batch: &Batch) -> EventResult<Vec<u8>> {
    let payload = PageViewsPayload::from(batch);
    Ok(serde_json::to_vec(&payload)?)
}

/// Decodes payload JSON bytes into a batch.
///
/// # Errors
///
/// Returns an error if the bytes are not a payload document or any entry
/// carries an identifier that is not a UUID.
pub fn decode_batch(bytes: &[u8]) -> EventResult<Batch> {
    let payload: PageViewsPayload = serde_json::from_slice(bytes)?;
    Batch::try_from(payload)
}
