//! Stress helpers for concurrent recording.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use uuid::Uuid;
use viewstats_core::Tracker;
use viewstats_delivery::HttpClient;
use viewstats_storage::SnapshotStore;

/// Configuration for stress runs.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of recording threads.
    pub threads: usize,
    /// Views recorded by each thread.
    pub records_per_thread: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            records_per_thread: 250,
        }
    }
}

impl StressConfig {
    /// Total number of views a run records.
    pub fn total(&self) -> usize {
        self.threads * self.records_per_thread
    }
}

/// Result of a stress run.
#[derive(Debug, Clone)]
pub struct StressResult {
    /// Views recorded successfully.
    pub recorded: usize,
    /// Calls that returned an error.
    pub failed: usize,
    /// Wall time of the recording phase.
    pub duration: Duration,
}

impl StressResult {
    /// Records per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.recorded as f64 / secs
        } else {
            0.0
        }
    }
}

/// Records from several threads at once and waits for them to finish.
///
/// Deliveries triggered along the way may still be in flight on return.
pub fn concurrent_record<C, S>(tracker: &Arc<Tracker<C, S>>, config: &StressConfig) -> StressResult
where
    C: HttpClient + 'static,
    S: SnapshotStore + 'static,
{
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let tracker = Arc::clone(tracker);
            let count = config.records_per_thread;
            thread::spawn(move || {
                let mut failed = 0;
                for _ in 0..count {
                    if tracker.record(&Uuid::new_v4().to_string()).is_err() {
                        failed += 1;
                    }
                }
                (count - failed, failed)
            })
        })
        .collect();

    let (recorded, failed) = handles
        .into_iter()
        .map(|h| h.join().expect("Recording thread panicked"))
        .fold((0, 0), |(r, f), (dr, df)| (r + dr, f + df));

    StressResult {
        recorded,
        failed,
        duration: start.elapsed(),
    }
}
