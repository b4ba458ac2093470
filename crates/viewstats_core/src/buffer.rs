//! In-memory batch buffer.

use parking_lot::Mutex;
use std::time::Duration;
use viewstats_event::{Batch, PageView};

/// The live, not-yet-flushed page views of a tracker.
///
/// All access goes through one mutex. [`BatchBuffer::snapshot_and_clear`]
/// takes the contents and empties the buffer in a single critical section,
/// so a view appended concurrently lands either in the snapshot or in the
/// next batch, never in both and never in neither.
#[derive(Debug)]
pub struct BatchBuffer {
    batch: Mutex<Batch>,
    bound: Option<usize>,
}

impl BatchBuffer {
    /// Creates an unbounded buffer.
    pub fn new() -> Self {
        Self {
            batch: Mutex::new(Batch::new()),
            bound: None,
        }
    }

    /// Creates a buffer holding at most `bound` views.
    ///
    /// Once full, each append drops the oldest view. A bound of zero is
    /// treated as one.
    pub fn bounded(bound: usize) -> Self {
        Self {
            batch: Mutex::new(Batch::new()),
            bound: Some(bound.max(1)),
        }
    }

    /// The configured bound, if any.
    pub fn bound(&self) -> Option<usize> {
        self.bound
    }

    /// Appends a view at the tail.
    ///
    /// Returns the number of old views dropped to respect the bound.
    pub fn append(&self, view: PageView) -> usize {
        let mut batch = self.batch.lock();
        batch.push(view);
        self.enforce_bound(&mut batch)
    }

    /// Places `older` in front of the buffered views.
    ///
    /// Used at setup for views recovered from a snapshot, which predate
    /// anything recorded in this run. Returns the number of views dropped
    /// to respect the bound.
    pub fn restore_front(&self, older: Batch) -> usize {
        let mut batch = self.batch.lock();
        batch.prepend(older);
        self.enforce_bound(&mut batch)
    }

    /// Takes every buffered view and leaves the buffer empty.
    pub fn snapshot_and_clear(&self) -> Batch {
        std::mem::take(&mut *self.batch.lock())
    }

    /// Returns true if the buffer holds more than `max_count` views, or if
    /// its oldest view is older than `max_age` at `now_millis`.
    ///
    /// An empty buffer never needs flushing.
    pub fn should_flush(&self, max_count: usize, max_age: Duration, now_millis: u64) -> bool {
        let batch = self.batch.lock();
        if batch.len() > max_count {
            return true;
        }
        match batch.oldest() {
            Some(oldest) => u128::from(oldest.age_millis(now_millis)) > max_age.as_millis(),
            None => false,
        }
    }

    /// Number of buffered views.
    pub fn len(&self) -> usize {
        self.batch.lock().len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.batch.lock().is_empty()
    }

    /// Copy of the buffered views, oldest first.
    pub fn contents(&self) -> Batch {
        self.batch.lock().clone()
    }

    fn enforce_bound(&self, batch: &mut Batch) -> usize {
        match self.bound {
            Some(bound) if batch.len() > bound => batch.drop_oldest(batch.len() - bound),
            _ => 0,
        }
    }
}

impl Default for BatchBuffer {
    fn default() -> Self {
        Self::new()
    }
}
