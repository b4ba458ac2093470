//! Delivery outcome classification.

use std::fmt;

/// What became of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The collector stored every view.
    Accepted,
    /// The collector stored some views and dropped the rest. The collector
    /// is the authority on what it kept; nothing is reconciled client-side.
    PartiallyAccepted,
    /// The collector refused the payload as malformed. Resending it
    /// unchanged cannot succeed.
    Rejected,
    /// Nothing is known to have been stored; the batch should be kept for
    /// a later attempt.
    TransientFailure,
}

impl Outcome {
    /// Classifies a response status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            206 => Outcome::PartiallyAccepted,
            200..=299 => Outcome::Accepted,
            400 | 422 => Outcome::Rejected,
            _ => Outcome::TransientFailure,
        }
    }

    /// Returns true if the batch must be persisted for retry.
    pub fn needs_retry(&self) -> bool {
        matches!(self, Outcome::TransientFailure)
    }

    /// Returns true if the collector kept at least part of the batch.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Accepted | Outcome::PartiallyAccepted)
    }

    /// Short lowercase label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Accepted => "accepted",
            Outcome::PartiallyAccepted => "partially_accepted",
            Outcome::Rejected => "rejected",
            Outcome::TransientFailure => "transient_failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
