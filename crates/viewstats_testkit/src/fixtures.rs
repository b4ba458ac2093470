//! Test fixtures.
//!
//! Provides temporary snapshot stores, a scriptable collector and a
//! tracker harness with a controllable clock.

use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;
use viewstats_core::{Tracker, TrackerConfig};
use viewstats_delivery::{DeliveryClient, DeliveryConfig, MockHttpClient};
use viewstats_event::{decode_batch, Batch, ManualClock, PageView, SessionId, SubjectId};
use viewstats_storage::{FileSnapshotStore, SnapshotStore, SNAPSHOT_FILE};

/// Endpoint configured on fake collectors.
pub const FAKE_ENDPOINT: &str = "https://collector.test/v1/page-views";

/// Start time of harness clocks (Unix epoch millis).
pub const START_MILLIS: u64 = 1_700_000_000_000;

/// A cache directory with automatic cleanup.
///
/// Each [`TestStore::open`] returns a fresh [`FileSnapshotStore`] on the
/// same directory, which is how tests simulate a process restart. The
/// previous store must be dropped first; it holds the directory lock.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Creates an empty cache directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// The cache directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join(SNAPSHOT_FILE)
    }

    /// Opens a store on the directory.
    pub fn open(&self) -> FileSnapshotStore {
        FileSnapshotStore::open(self.dir.path()).expect("Failed to open snapshot store")
    }

    /// Returns true if the snapshot file exists.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path().exists()
    }

    /// Decodes the snapshot file directly, bypassing any open store.
    pub fn read_snapshot(&self) -> Option<Batch> {
        let bytes = fs::read(self.snapshot_path()).ok()?;
        Some(decode_batch(&bytes).expect("Snapshot is not a valid payload"))
    }

    /// Parses the snapshot file as untyped JSON.
    pub fn read_json(&self) -> Option<serde_json::Value> {
        let bytes = fs::read(self.snapshot_path()).ok()?;
        Some(serde_json::from_slice(&bytes).expect("Snapshot is not JSON"))
    }

    /// Overwrites the snapshot file with `bytes`.
    pub fn write_raw(&self, bytes: &[u8]) {
        fs::write(self.snapshot_path(), bytes).expect("Failed to write snapshot");
    }

    /// Saves `batch` as the snapshot through a short-lived store.
    pub fn seed(&self, batch: &Batch) {
        self.open().save(batch).expect("Failed to seed snapshot");
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A scriptable stand-in for the collector.
///
/// Derefs to [`MockHttpClient`] for scripting replies and holding
/// deliveries in flight.
#[derive(Clone)]
pub struct FakeCollector {
    client: Arc<MockHttpClient>,
}

impl FakeCollector {
    /// A collector answering 200 to everything.
    pub fn new() -> Self {
        Self {
            client: Arc::new(MockHttpClient::new()),
        }
    }

    /// A collector answering `status` to everything.
    pub fn always(status: u16) -> Self {
        Self {
            client: Arc::new(MockHttpClient::always(status)),
        }
    }

    /// Shared handle to the underlying client.
    pub fn client(&self) -> Arc<MockHttpClient> {
        Arc::clone(&self.client)
    }

    /// A delivery client posting to this collector.
    pub fn delivery(&self) -> DeliveryClient<Arc<MockHttpClient>> {
        DeliveryClient::new(DeliveryConfig::new(FAKE_ENDPOINT), self.client())
    }

    /// Every batch received, in arrival order.
    pub fn batches(&self) -> Vec<Batch> {
        self.client.received_batches()
    }

    /// Total number of views received across all batches.
    pub fn delivered_events(&self) -> usize {
        self.batches().iter().map(Batch::len).sum()
    }
}

impl Default for FakeCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for FakeCollector {
    type Target = MockHttpClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

/// A tracker wired to a [`FakeCollector`].
pub type TestTracker<S> = Tracker<Arc<MockHttpClient>, S>;

/// Builds trackers that share one collector and one manual clock.
pub struct TrackerHarness {
    /// The collector every tracker delivers to.
    pub collector: FakeCollector,
    /// The clock every tracker stamps views with.
    pub clock: Arc<ManualClock>,
}

impl TrackerHarness {
    /// A harness with a collector answering 200.
    pub fn new() -> Self {
        Self::with_collector(FakeCollector::new())
    }

    /// A harness around `collector`.
    pub fn with_collector(collector: FakeCollector) -> Self {
        Self {
            collector,
            clock: Arc::new(ManualClock::new(START_MILLIS)),
        }
    }

    /// Sets up a tracker over `store`.
    pub fn tracker<S: SnapshotStore + 'static>(
        &self,
        config: TrackerConfig,
        store: S,
    ) -> TestTracker<S> {
        Tracker::setup_with_clock(config, self.collector.delivery(), store, self.clock.clone())
            .expect("Failed to set up tracker")
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

impl Default for TrackerHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` random subject ids in textual form.
pub fn subject_ids(n: usize) -> Vec<String> {
    (0..n).map(|_| Uuid::new_v4().to_string()).collect()
}

/// A batch of `n` views from one session, one millisecond apart.
pub fn sample_batch(n: usize, start_millis: u64) -> Batch {
    let session = SessionId::new();
    (0..n as u64)
        .map(|i| PageView::new(SubjectId::from_uuid(Uuid::new_v4()), session, start_millis + i))
        .collect()
}
