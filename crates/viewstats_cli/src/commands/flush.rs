//! Flush command implementation.

use super::{print_stats, CollectorArgs};
use std::path::Path;
use tracing::debug;
use viewstats_core::{Tracker, TrackerConfig};
use viewstats_storage::{FileSnapshotStore, SnapshotStore};

/// Runs the flush command.
///
/// Delivers the saved snapshot, if any. A transient failure saves it again
/// for the next attempt.
pub fn run(
    cache_dir: &Path,
    collector: &CollectorArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSnapshotStore::open(cache_dir)?;
    if !store.has_snapshot() {
        println!("No saved events in {}", cache_dir.display());
        return Ok(());
    }
    debug!(endpoint = %collector.endpoint, "delivering saved snapshot");

    let tracker = Tracker::setup(
        TrackerConfig::default().verbose(verbose).flush_restored(true),
        collector.delivery()?,
        store,
    )?;
    tracker.wait_idle();

    let stats = tracker.stats();
    let pending = tracker.pending_events();
    let still_saved = stats.persisted > 0;
    tracker.close();

    print_stats(&stats, pending);
    if still_saved {
        println!("Delivery failed, events kept in {}", cache_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use uuid::Uuid;
    use viewstats_event::{Batch, PageView, SessionId, SubjectId};

    // Port 9 (discard) on loopback is closed on test machines.
    fn unreachable() -> CollectorArgs {
        CollectorArgs {
            endpoint: "http://127.0.0.1:9/views".into(),
            token: None,
            connect_timeout: 1,
            read_timeout: 1,
        }
    }

    #[test]
    fn nothing_to_flush() {
        let dir = tempdir().unwrap();
        assert!(run(dir.path(), &unreachable(), false).is_ok());
    }

    #[test]
    fn failed_flush_keeps_snapshot() {
        let dir = tempdir().unwrap();
        let session = SessionId::new();
        let batch: Batch = (0..3)
            .map(|i| PageView::new(SubjectId::from_uuid(Uuid::new_v4()), session, 1_000 + i))
            .collect();
        FileSnapshotStore::open(dir.path()).unwrap().save(&batch).unwrap();

        assert!(run(dir.path(), &unreachable(), false).is_ok());

        let store = FileSnapshotStore::open(dir.path()).unwrap();
        assert_eq!(store.peek().unwrap(), Some(batch));
    }
}
