//! Page-view record and its identifiers.

use crate::error::{EventError, EventResult};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of the page or screen being viewed.
///
/// Subject ids are supplied by the caller and must be UUIDs; the collector
/// keys pages by UUID and drops anything else.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubjectId(Uuid);

impl SubjectId {
    /// Creates a subject id from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a subject id from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidSubjectId`] if `value` is not a UUID.
    pub fn parse(value: &str) -> EventResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|e| EventError::invalid_subject(value, e))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for SubjectId {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectId({})", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SubjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Identifier of one tracker lifetime.
///
/// Generated once when a tracker is set up and stamped on every page view it
/// records.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session id from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a session id from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidSessionId`] if `value` is not a UUID.
    pub fn parse(value: &str) -> EventResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|e| EventError::invalid_session(value, e))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged page view.
///
/// Immutable once built. Two page views with identical fields are legal:
/// retries deliver the same view more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    subject: SubjectId,
    session: SessionId,
    captured_at: u64,
}

impl PageView {
    /// Creates a page view captured at `captured_at` (Unix epoch millis).
    #[must_use]
    pub const fn new(subject: SubjectId, session: SessionId, captured_at: u64) -> Self {
        Self {
            subject,
            session,
            captured_at,
        }
    }

    /// The viewed subject.
    #[inline]
    #[must_use]
    pub const fn subject(&self) -> SubjectId {
        self.subject
    }

    /// The session that recorded the view.
    #[inline]
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Capture time in Unix epoch milliseconds.
    #[inline]
    #[must_use]
    pub const fn captured_at(&self) -> u64 {
        self.captured_at
    }

    /// Milliseconds elapsed between capture and `now_millis`.
    ///
    /// Saturates at zero if the clock went backwards.
    #[must_use]
    pub const fn age_millis(&self, now_millis: u64) -> u64 {
        now_millis.saturating_sub(self.captured_at)
    }
}
