//! Tracker state and statistics.

use std::time::Instant;
use viewstats_delivery::Outcome;

/// What the tracker is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No delivery is queued or in flight.
    Idle,
    /// At least one flushed batch has not finished delivery.
    Flushing,
}

impl TrackerState {
    /// Returns true if a delivery is queued or in flight.
    pub fn is_flushing(&self) -> bool {
        matches!(self, TrackerState::Flushing)
    }
}

/// Counters describing tracker activity since setup.
#[derive(Debug, Clone, Default)]
pub struct TrackerStats {
    /// Views appended to the buffer.
    pub recorded: u64,
    /// Views recovered from a snapshot at setup.
    pub restored: u64,
    /// Views discarded because the buffer bound was reached.
    pub dropped: u64,
    /// Batches handed to the flush worker.
    pub flushes: u64,
    /// Batches fully accepted by the collector.
    pub accepted: u64,
    /// Batches partially accepted by the collector.
    pub partially_accepted: u64,
    /// Batches rejected as malformed and discarded.
    pub rejected: u64,
    /// Batches that failed transiently.
    pub transient_failures: u64,
    /// Views written to the snapshot for a later run.
    pub persisted: u64,
    /// Views lost because the snapshot could not be written.
    pub lost: u64,
    /// Outcome of the most recent delivery.
    pub last_outcome: Option<Outcome>,
    /// When the most recent delivery finished.
    pub last_delivery_time: Option<Instant>,
}

impl TrackerStats {
    pub(crate) fn record_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Accepted => self.accepted += 1,
            Outcome::PartiallyAccepted => self.partially_accepted += 1,
            Outcome::Rejected => self.rejected += 1,
            Outcome::TransientFailure => self.transient_failures += 1,
        }
        self.last_outcome = Some(outcome);
        self.last_delivery_time = Some(Instant::now());
    }

    /// Number of deliveries that have finished, whatever their outcome.
    pub fn deliveries(&self) -> u64 {
        self.accepted + self.partially_accepted + self.rejected + self.transient_failures
    }
}
