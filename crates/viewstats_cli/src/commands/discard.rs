//! Discard command implementation.

use std::path::Path;
use viewstats_storage::{FileSnapshotStore, SnapshotStore};

/// Runs the discard command. Returns true if a snapshot was removed.
pub fn run(cache_dir: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let store = FileSnapshotStore::open(cache_dir)?;
    let removed = store.discard()?;
    if removed {
        println!("Discarded saved events in {}", cache_dir.display());
    } else {
        println!("No saved events in {}", cache_dir.display());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use uuid::Uuid;
    use viewstats_event::{Batch, PageView, SessionId, SubjectId};

    #[test]
    fn discard_removes_snapshot_once() {
        let dir = tempdir().unwrap();
        {
            let store = FileSnapshotStore::open(dir.path()).unwrap();
            let batch: Batch = vec![PageView::new(
                SubjectId::from_uuid(Uuid::new_v4()),
                SessionId::new(),
                1_700_000_000_000,
            )]
            .into();
            store.save(&batch).unwrap();
        }

        assert!(run(dir.path()).unwrap());
        assert!(!run(dir.path()).unwrap());
    }
}
