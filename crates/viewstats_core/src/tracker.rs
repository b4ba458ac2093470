//! Page-view tracker.

use crate::buffer::BatchBuffer;
use crate::config::TrackerConfig;
use crate::error::CoreResult;
use crate::state::{TrackerState, TrackerStats};
use crate::worker::{FlushWorker, Job, Pending};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};
use viewstats_delivery::{DeliveryClient, HttpClient};
use viewstats_event::{encode_batch, Batch, Clock, PageView, SessionId, SubjectId, SystemClock};
use viewstats_storage::SnapshotStore;

/// State reachable from the flush worker.
struct Shared<C: HttpClient, S: SnapshotStore> {
    delivery: DeliveryClient<C>,
    store: S,
    stats: RwLock<TrackerStats>,
    verbose: bool,
}

impl<C: HttpClient, S: SnapshotStore> Shared<C, S> {
    /// Delivers one flushed batch and disposes of it according to the
    /// outcome.
    fn deliver(&self, batch: Batch) {
        if self.verbose {
            if let Ok(body) = encode_batch(&batch) {
                debug!(
                    events = batch.len(),
                    payload = %String::from_utf8_lossy(&body),
                    "delivering batch"
                );
            }
        }

        let outcome = self.delivery.send(&batch);
        self.stats.write().record_outcome(outcome);

        if outcome.needs_retry() {
            self.persist(batch);
        }
    }

    /// Saves `batch` behind whatever snapshot is already in the slot.
    fn persist(&self, batch: Batch) {
        let events = batch.len() as u64;
        let merged = match self.store.peek() {
            Ok(Some(mut existing)) => {
                existing.extend_from(batch);
                existing
            }
            Ok(None) => batch,
            Err(e) => {
                warn!(error = %e, "existing snapshot unreadable, replacing it");
                batch
            }
        };

        match self.store.save(&merged) {
            Ok(()) => {
                self.stats.write().persisted += events;
                info!(events, total = merged.len(), "saved batch for the next run");
            }
            Err(e) => {
                self.stats.write().lost += events;
                error!(error = %e, events, "failed to save batch, views lost");
            }
        }
    }
}

/// Records page views and ships them to the collector in batches.
///
/// `record` runs entirely on the caller's thread and only touches the
/// in-memory buffer. When the [`crate::FlushPolicy`] fires, the buffer is
/// snapshotted and cleared, and the snapshot is handed to a background
/// worker that performs the HTTP exchange. Batches that fail transiently
/// are written to the [`SnapshotStore`] and picked up again by the next
/// [`Tracker::setup`].
///
/// Only a malformed subject id is ever reported to the caller. Delivery
/// and persistence problems are logged and counted in [`TrackerStats`].
///
/// Dropping the tracker is equivalent to [`Tracker::close`].
pub struct Tracker<C: HttpClient + 'static, S: SnapshotStore + 'static> {
    config: TrackerConfig,
    session: SessionId,
    clock: Arc<dyn Clock>,
    buffer: BatchBuffer,
    shared: Arc<Shared<C, S>>,
    worker: Mutex<Option<FlushWorker>>,
    pending: Arc<Pending>,
}

impl<C: HttpClient + 'static, S: SnapshotStore + 'static> Tracker<C, S> {
    /// Creates a tracker stamping views with the system clock.
    ///
    /// See [`Tracker::setup_with_clock`].
    ///
    /// # Errors
    ///
    /// Returns an error if the flush worker cannot be started.
    pub fn setup(
        config: TrackerConfig,
        delivery: DeliveryClient<C>,
        store: S,
    ) -> CoreResult<Self> {
        Self::setup_with_clock(config, delivery, store, Arc::new(SystemClock))
    }

    /// Creates a tracker.
    ///
    /// A fresh session id is generated. Any snapshot left by an earlier run
    /// is restored into the buffer ahead of new views before this returns;
    /// an unreadable snapshot is logged and skipped. With
    /// [`TrackerConfig::flush_restored`] set, restored views are flushed
    /// right away.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush worker cannot be started.
    pub fn setup_with_clock(
        config: TrackerConfig,
        delivery: DeliveryClient<C>,
        store: S,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        let pending = Arc::new(Pending::default());
        let worker = FlushWorker::spawn(Arc::clone(&pending))?;

        let buffer = match config.max_buffered {
            Some(bound) => BatchBuffer::bounded(bound),
            None => BatchBuffer::new(),
        };

        let restored = match store.restore() {
            Ok(batch) => batch,
            Err(e) => {
                warn!(error = %e, "failed to restore snapshot, starting empty");
                Batch::new()
            }
        };
        let restored_count = restored.len() as u64;
        let dropped = buffer.restore_front(restored) as u64;
        if dropped > 0 {
            warn!(dropped, "restored snapshot exceeds buffer bound, oldest views dropped");
        }

        let stats = TrackerStats {
            restored: restored_count,
            dropped,
            ..TrackerStats::default()
        };

        let tracker = Self {
            session: SessionId::new(),
            clock,
            buffer,
            shared: Arc::new(Shared {
                delivery,
                store,
                stats: RwLock::new(stats),
                verbose: config.verbose,
            }),
            worker: Mutex::new(Some(worker)),
            pending,
            config,
        };

        info!(
            session = %tracker.session,
            restored = restored_count,
            endpoint = %tracker.shared.delivery.config().endpoint,
            "tracker ready"
        );

        if tracker.config.flush_restored && restored_count > 0 {
            tracker.flush();
        }

        Ok(tracker)
    }

    /// Records a view of the subject identified by `subject_id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Event`] if `subject_id` is not a UUID.
    /// The buffer is left untouched in that case.
    pub fn record(&self, subject_id: &str) -> CoreResult<()> {
        let subject = SubjectId::parse(subject_id)?;
        self.record_subject(subject);
        Ok(())
    }

    /// Records a view of `subject`, flushing if the policy says so.
    pub fn record_subject(&self, subject: SubjectId) {
        let view = PageView::new(subject, self.session, self.clock.now_millis());
        let dropped = self.buffer.append(view);

        {
            let mut stats = self.shared.stats.write();
            stats.recorded += 1;
            stats.dropped += dropped as u64;
        }
        if dropped > 0 {
            warn!(dropped, bound = ?self.buffer.bound(), "buffer full, oldest views dropped");
        }

        if self.config.verbose {
            debug!(subject = %subject, captured_at = view.captured_at(), "recorded page view");
        } else {
            trace!(subject = %subject, "recorded page view");
        }

        let policy = self.config.policy;
        if self
            .buffer
            .should_flush(policy.max_count, policy.max_age, self.clock.now_millis())
        {
            self.flush();
        }
    }

    /// Hands the current buffer to the flush worker.
    ///
    /// Returns false without doing anything if the buffer is empty.
    /// Delivery happens in the background; use [`Tracker::wait_idle`] to
    /// wait for it.
    pub fn flush(&self) -> bool {
        let batch = self.buffer.snapshot_and_clear();
        if batch.is_empty() {
            return false;
        }

        let events = batch.len();
        self.shared.stats.write().flushes += 1;
        debug!(events, "flushing");

        let shared = Arc::clone(&self.shared);
        let job: Job = Box::new(move || shared.deliver(batch));

        let rejected = match self.worker.lock().as_ref() {
            Some(worker) => worker.submit(job).err(),
            None => Some(job),
        };
        if let Some(job) = rejected {
            debug!(events, "flush worker stopped, delivering inline");
            job();
        }
        true
    }

    /// The host application moved to the background.
    ///
    /// Flushes whatever is buffered, regardless of the policy.
    pub fn on_background(&self) {
        debug!(pending = self.buffer.len(), "entering background");
        self.flush();
    }

    /// The host application returned to the foreground.
    ///
    /// Nothing is flushed; the buffer keeps accumulating.
    pub fn on_foreground(&self) {
        debug!(pending = self.buffer.len(), "entering foreground");
    }

    /// Blocks until every flushed batch has been delivered or persisted.
    pub fn wait_idle(&self) {
        self.pending.wait_idle();
    }

    /// Like [`Tracker::wait_idle`] but gives up after `timeout`.
    ///
    /// Returns true if the tracker became idle.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        self.pending.wait_idle_timeout(timeout)
    }

    /// Returns the current state.
    pub fn state(&self) -> TrackerState {
        if self.pending.get() > 0 {
            TrackerState::Flushing
        } else {
            TrackerState::Idle
        }
    }

    /// Returns a copy of the statistics.
    pub fn stats(&self) -> TrackerStats {
        self.shared.stats.read().clone()
    }

    /// The session id stamped on every view recorded by this tracker.
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    /// Number of views waiting in the buffer.
    pub fn pending_events(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the delivery client.
    pub fn delivery(&self) -> &DeliveryClient<C> {
        &self.shared.delivery
    }

    /// Returns the snapshot store.
    pub fn store(&self) -> &S {
        &self.shared.store
    }

    /// Shuts the tracker down.
    ///
    /// Queued and in-flight deliveries are allowed to finish. Afterwards,
    /// if [`TrackerConfig::persist_on_shutdown`] is set, views still in the
    /// buffer are saved for the next run instead of being sent.
    pub fn close(self) {
        self.shutdown();
    }

    fn shutdown(&self) {
        let worker = self.worker.lock().take();
        let Some(mut worker) = worker else {
            return;
        };
        worker.shutdown();

        let remaining = self.buffer.snapshot_and_clear();
        if remaining.is_empty() {
            info!(session = %self.session, "tracker closed");
            return;
        }

        if self.config.persist_on_shutdown {
            info!(events = remaining.len(), "persisting buffer on shutdown");
            self.shared.persist(remaining);
        } else {
            warn!(events = remaining.len(), "discarding buffer on shutdown");
        }
    }
}

impl<C: HttpClient + 'static, S: SnapshotStore + 'static> Drop for Tracker<C, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlushPolicy;
    use crate::CoreError;
    use std::thread;
    use uuid::Uuid;
    use viewstats_delivery::{DeliveryConfig, DeliveryError, MockHttpClient, MockReply, Outcome};
    use viewstats_event::ManualClock;
    use viewstats_storage::{
        FileSnapshotStore, InMemorySnapshotStore, StorageError, StorageResult,
    };

    const WAIT: Duration = Duration::from_secs(5);
    const START: u64 = 1_700_000_000_000;

    type TestTracker = Tracker<Arc<MockHttpClient>, Arc<InMemorySnapshotStore>>;

    struct Harness {
        mock: Arc<MockHttpClient>,
        store: Arc<InMemorySnapshotStore>,
        clock: Arc<ManualClock>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                mock: Arc::new(MockHttpClient::new()),
                store: Arc::new(InMemorySnapshotStore::new()),
                clock: Arc::new(ManualClock::new(START)),
            }
        }

        fn tracker(&self, config: TrackerConfig) -> TestTracker {
            let delivery = DeliveryClient::new(
                DeliveryConfig::new("https://collector.example.com/views"),
                Arc::clone(&self.mock),
            );
            Tracker::setup_with_clock(config, delivery, Arc::clone(&self.store), self.clock.clone())
                .unwrap()
        }

        fn delivered(&self) -> Vec<Batch> {
            self.mock.received_batches()
        }
    }

    fn subject() -> String {
        Uuid::new_v4().to_string()
    }

    fn record_n(tracker: &TestTracker, n: usize) {
        record_n_any(tracker, n);
    }

    fn record_n_any<C, S>(tracker: &Tracker<C, S>, n: usize)
    where
        C: HttpClient + 'static,
        S: SnapshotStore + 'static,
    {
        for _ in 0..n {
            tracker.record(&subject()).unwrap();
        }
    }

    fn batch_of(n: u64) -> Batch {
        let session = SessionId::new();
        (0..n)
            .map(|i| PageView::new(SubjectId::from_uuid(Uuid::new_v4()), session, START - 1_000 + i))
            .collect()
    }

    #[test]
    fn setup_with_empty_store() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        assert_eq!(tracker.pending_events(), 0);
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.stats().restored, 0);
    }

    #[test]
    fn invalid_subject_fails_only_that_call() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        tracker.record(&subject()).unwrap();
        let err = tracker.record("home-screen").unwrap_err();
        assert!(matches!(err, CoreError::Event(_)));
        tracker.record(&subject()).unwrap();

        assert_eq!(tracker.pending_events(), 2);
        assert_eq!(tracker.stats().recorded, 2);
    }

    #[test]
    fn twenty_records_do_not_flush() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 20);
        tracker.wait_idle();

        assert_eq!(h.mock.request_count(), 0);
        assert_eq!(tracker.pending_events(), 20);
    }

    #[test]
    fn twenty_first_record_flushes_all_twenty_one() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 21);
        tracker.wait_idle();

        let delivered = h.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].len(), 21);
        assert_eq!(tracker.pending_events(), 0);
        assert_eq!(tracker.stats().accepted, 1);
    }

    #[test]
    fn stale_oldest_view_triggers_flush() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        tracker.record(&subject()).unwrap();
        h.clock.advance(Duration::from_millis(120_000));
        tracker.record(&subject()).unwrap();
        tracker.wait_idle();
        assert_eq!(h.mock.request_count(), 0);

        h.clock.advance(Duration::from_millis(1));
        tracker.record(&subject()).unwrap();
        tracker.wait_idle();

        let delivered = h.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].len(), 3);
    }

    #[test]
    fn views_carry_session_and_capture_time() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());
        let id = subject();

        tracker.record(&id).unwrap();
        h.clock.advance(Duration::from_millis(250));
        tracker.record(&id).unwrap();
        tracker.on_background();
        tracker.wait_idle();

        let batch = &h.delivered()[0];
        let times: Vec<u64> = batch.iter().map(PageView::captured_at).collect();
        assert_eq!(times, vec![START, START + 250]);
        assert!(batch.iter().all(|v| v.session() == tracker.session_id()));
        assert!(batch.iter().all(|v| v.subject().to_string() == id));
    }

    #[test]
    fn background_flushes_any_nonempty_buffer() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        tracker.on_background();
        tracker.wait_idle();
        assert_eq!(h.mock.request_count(), 0);

        record_n(&tracker, 3);
        tracker.on_background();
        tracker.wait_idle();

        assert_eq!(h.delivered()[0].len(), 3);
        assert_eq!(tracker.pending_events(), 0);
    }

    #[test]
    fn foreground_does_not_flush() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 3);
        tracker.on_foreground();
        tracker.wait_idle();

        assert_eq!(h.mock.request_count(), 0);
        assert_eq!(tracker.pending_events(), 3);
    }

    #[test]
    fn only_transient_failure_leaves_a_snapshot() {
        let cases = [
            (200, Outcome::Accepted, false),
            (206, Outcome::PartiallyAccepted, false),
            (400, Outcome::Rejected, false),
            (503, Outcome::TransientFailure, true),
        ];

        for (status, outcome, persisted) in cases {
            let h = Harness::new();
            h.mock.set_fallback(MockReply::Status(status));
            let tracker = h.tracker(TrackerConfig::default().persist_on_shutdown(false));

            record_n(&tracker, 4);
            tracker.on_background();
            tracker.wait_idle();

            assert_eq!(tracker.pending_events(), 0, "status {status}");
            assert_eq!(h.store.has_snapshot(), persisted, "status {status}");
            assert_eq!(tracker.stats().last_outcome, Some(outcome));
            if persisted {
                assert_eq!(h.store.peek().unwrap().unwrap(), h.delivered()[0]);
            }
        }
    }

    #[test]
    fn timeout_is_persisted() {
        let h = Harness::new();
        h.mock.set_fallback(MockReply::Fail(DeliveryError::Timeout));
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 2);
        tracker.on_background();
        tracker.wait_idle();

        assert_eq!(h.store.peek().unwrap().unwrap().len(), 2);
        assert_eq!(tracker.stats().persisted, 2);
    }

    #[test]
    fn consecutive_failures_merge_into_one_snapshot() {
        let h = Harness::new();
        h.mock.set_fallback(MockReply::Status(500));
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 2);
        tracker.on_background();
        record_n(&tracker, 3);
        tracker.on_background();
        tracker.wait_idle();

        let delivered = h.delivered();
        let mut expected = delivered[0].clone();
        expected.extend_from(delivered[1].clone());

        assert_eq!(h.store.peek().unwrap().unwrap(), expected);
        assert_eq!(tracker.stats().transient_failures, 2);
    }

    /// A slot whose existing contents never decode.
    struct CorruptSlot(InMemorySnapshotStore);

    impl SnapshotStore for CorruptSlot {
        fn save(&self, batch: &Batch) -> StorageResult<()> {
            self.0.save(batch)
        }
        fn restore(&self) -> StorageResult<Batch> {
            Ok(Batch::new())
        }
        fn peek(&self) -> StorageResult<Option<Batch>> {
            Err(StorageError::Corrupted("expected value at line 1".into()))
        }
        fn discard(&self) -> StorageResult<bool> {
            self.0.discard()
        }
        fn has_snapshot(&self) -> bool {
            self.0.has_snapshot()
        }
    }

    #[test]
    fn corrupt_existing_snapshot_is_replaced() {
        let mock = Arc::new(MockHttpClient::always(500));
        let delivery = DeliveryClient::new(
            DeliveryConfig::new("https://collector.example.com/views"),
            Arc::clone(&mock),
        );
        let store = CorruptSlot(InMemorySnapshotStore::new());
        let tracker = Tracker::setup(TrackerConfig::default(), delivery, store).unwrap();

        record_n_any(&tracker, 2);
        tracker.on_background();
        tracker.wait_idle();

        let saved = tracker.store().0.restore().unwrap();
        assert_eq!(saved, mock.received_batches()[0]);
        assert_eq!(tracker.stats().persisted, 2);
    }

    #[test]
    fn restored_views_precede_new_ones() {
        let h = Harness::new();
        let restored = batch_of(3);
        h.store.save(&restored).unwrap();

        let tracker = h.tracker(TrackerConfig::default());
        assert_eq!(tracker.pending_events(), 3);
        assert_eq!(tracker.stats().restored, 3);
        assert!(!h.store.has_snapshot());

        record_n(&tracker, 2);
        tracker.on_background();
        tracker.wait_idle();

        let delivered = &h.delivered()[0];
        assert_eq!(delivered.len(), 5);
        assert_eq!(&delivered.as_slice()[..3], restored.as_slice());
    }

    #[test]
    fn flush_restored_sends_immediately() {
        let h = Harness::new();
        h.store.save(&batch_of(4)).unwrap();

        let tracker = h.tracker(TrackerConfig::default().flush_restored(true));
        tracker.wait_idle();

        assert_eq!(h.delivered()[0].len(), 4);
        assert_eq!(tracker.pending_events(), 0);
    }

    #[test]
    fn close_persists_buffer() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 3);
        tracker.close();

        assert_eq!(h.mock.request_count(), 0);
        assert_eq!(h.store.peek().unwrap().unwrap().len(), 3);
    }

    #[test]
    fn close_without_persist_discards_buffer() {
        let h = Harness::new();
        let tracker = h.tracker(TrackerConfig::default().persist_on_shutdown(false));

        record_n(&tracker, 3);
        drop(tracker);

        assert!(!h.store.has_snapshot());
    }

    #[test]
    fn close_drains_queued_deliveries() {
        let h = Harness::new();
        h.mock.set_fallback(MockReply::Status(503));
        let tracker = h.tracker(TrackerConfig::default());

        record_n(&tracker, 21);
        record_n(&tracker, 2);
        tracker.close();

        assert_eq!(h.mock.request_count(), 1);
        // The failed batch is saved first, the live buffer is appended.
        let snapshot = h.store.peek().unwrap().unwrap();
        assert_eq!(snapshot.len(), 23);
        assert_eq!(&snapshot.as_slice()[..21], h.delivered()[0].as_slice());
    }

    #[test]
    fn recording_continues_while_delivery_is_in_flight() {
        let h = Harness::new();
        h.mock.hold();
        let tracker = Arc::new(h.tracker(TrackerConfig::default()));

        record_n(&tracker, 21);
        assert!(h.mock.wait_for_requests(1, WAIT));
        assert_eq!(tracker.state(), TrackerState::Flushing);

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for _ in 0..10 {
                        tracker.record(&subject()).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        h.mock.release();
        assert!(tracker.wait_idle_timeout(WAIT));
        assert_eq!(tracker.state(), TrackerState::Idle);

        let delivered: usize = h.delivered().iter().map(Batch::len).sum();
        assert_eq!(delivered + tracker.pending_events(), 61);
        assert_eq!(tracker.stats().recorded, 61);
    }

    #[test]
    fn bounded_buffer_drops_and_counts() {
        let h = Harness::new();
        let config = TrackerConfig::default()
            .policy(FlushPolicy::new(100, Duration::from_secs(3_600)))
            .max_buffered(5);
        let tracker = h.tracker(config);

        record_n(&tracker, 8);

        assert_eq!(tracker.pending_events(), 5);
        assert_eq!(tracker.stats().dropped, 3);
        assert_eq!(tracker.stats().recorded, 8);
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn save(&self, _batch: &Batch) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
        fn restore(&self) -> StorageResult<Batch> {
            Err(StorageError::Io(std::io::Error::other("unreadable")))
        }
        fn peek(&self) -> StorageResult<Option<Batch>> {
            Ok(None)
        }
        fn discard(&self) -> StorageResult<bool> {
            Ok(false)
        }
        fn has_snapshot(&self) -> bool {
            false
        }
    }

    #[test]
    fn storage_failures_are_logged_not_raised() {
        let mock = Arc::new(MockHttpClient::always(500));
        let delivery = DeliveryClient::new(
            DeliveryConfig::new("https://collector.example.com/views"),
            Arc::clone(&mock),
        );
        let tracker = Tracker::setup(TrackerConfig::default(), delivery, FailingStore).unwrap();

        tracker.record(&subject()).unwrap();
        tracker.on_background();
        tracker.wait_idle();

        let stats = tracker.stats();
        assert_eq!(stats.transient_failures, 1);
        assert_eq!(stats.lost, 1);
        assert_eq!(stats.persisted, 0);
    }

    #[test]
    fn file_store_carries_views_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let h = Harness::new();
        h.mock.set_fallback(MockReply::Status(503));
        let delivery = || {
            DeliveryClient::new(
                DeliveryConfig::new("https://collector.example.com/views"),
                Arc::clone(&h.mock),
            )
        };

        let first = Tracker::setup_with_clock(
            TrackerConfig::default(),
            delivery(),
            FileSnapshotStore::open(dir.path()).unwrap(),
            h.clock.clone(),
        )
        .unwrap();
        record_n_any(&first, 2);
        first.on_background();
        first.wait_idle();
        record_n_any(&first, 1);
        drop(first);

        h.mock.set_fallback(MockReply::Status(200));
        let second = Tracker::setup_with_clock(
            TrackerConfig::default().flush_restored(true),
            delivery(),
            FileSnapshotStore::open(dir.path()).unwrap(),
            h.clock.clone(),
        )
        .unwrap();
        assert!(second.wait_idle_timeout(WAIT));

        assert_eq!(second.stats().restored, 3);
        assert_eq!(h.delivered().last().map(Batch::len), Some(3));
        assert!(!second.store().has_snapshot());
    }
}
