//! File-based snapshot store.
//!
//! Directory layout:
//!
//! ```text
//! <cache_dir>/
//! ├─ LOCK                  # Advisory lock, one owning process
//! ├─ saved_file.json       # The snapshot slot
//! └─ saved_file.json.tmp   # Transient, only during save
//! ```

use crate::error::{StorageError, StorageResult};
use crate::store::SnapshotStore;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use viewstats_event::{decode_batch, encode_batch, Batch};

/// Default file name of the snapshot slot.
pub const SNAPSHOT_FILE: &str = "saved_file.json";

/// Name of the advisory lock file.
pub const LOCK_FILE: &str = "LOCK";

/// A snapshot store backed by one JSON file.
///
/// # Durability
///
/// `save` writes a temporary file, syncs it, renames it over the slot and
/// then syncs the directory. A crash at any point leaves either the old
/// snapshot or the new one, never a torn file under the slot name.
///
/// # Thread Safety
///
/// The store holds an exclusive advisory lock on its directory for its whole
/// lifetime, and serializes slot access between threads internally.
///
/// # Example
///
/// ```no_run
/// use viewstats_storage::{FileSnapshotStore, SnapshotStore};
/// use std::path::Path;
///
/// let store = FileSnapshotStore::open(Path::new("cache")).unwrap();
/// let pending = store.restore().unwrap();
/// println!("{} views recovered", pending.len());
/// ```
#[derive(Debug)]
pub struct FileSnapshotStore {
    dir: PathBuf,
    path: PathBuf,
    temp_path: PathBuf,
    io: Mutex<()>,
    _lock_file: File,
}

impl FileSnapshotStore {
    /// Opens the store in `dir` using the default slot name.
    ///
    /// The directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another store owns the directory,
    /// or an I/O error if it cannot be created.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        Self::open_with_name(dir, SNAPSHOT_FILE)
    }

    /// Opens the store in `dir` with a custom slot file name.
    ///
    /// # Errors
    ///
    /// See [`FileSnapshotStore::open`].
    pub fn open_with_name(dir: &Path, file_name: &str) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked);
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            path: dir.join(file_name),
            temp_path: dir.join(format!("{file_name}.tmp")),
            io: Mutex::new(()),
            _lock_file: lock_file,
        })
    }

    /// Path of the snapshot slot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the slot.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_slot(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove_slot(&self) -> StorageResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                self.sync_directory()?;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        let dir = File::open(&self.dir)?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StorageResult<()> {
        // NTFS journals metadata updates
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, batch: &Batch) -> StorageResult<()> {
        let _guard = self.io.lock();

        if batch.is_empty() {
            self.remove_slot()?;
            return Ok(());
        }

        let data = encode_batch(batch)?;

        let mut file = File::create(&self.temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&self.temp_path, &self.path)?;
        self.sync_directory()?;

        debug!(events = batch.len(), path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    fn restore(&self) -> StorageResult<Batch> {
        let _guard = self.io.lock();

        let Some(data) = self.read_slot()? else {
            return Ok(Batch::new());
        };

        let batch = match decode_batch(&data) {
            Ok(batch) => batch,
            Err(e) => {
                warn!(
                    error = %e,
                    bytes = data.len(),
                    path = %self.path.display(),
                    "discarding corrupt snapshot"
                );
                Batch::new()
            }
        };

        self.remove_slot()?;
        debug!(events = batch.len(), "snapshot restored");
        Ok(batch)
    }

    fn peek(&self) -> StorageResult<Option<Batch>> {
        let _guard = self.io.lock();

        match self.read_slot()? {
            Some(data) => decode_batch(&data)
                .map(Some)
                .map_err(|e| StorageError::Corrupted(e.to_string())),
            None => Ok(None),
        }
    }

    fn discard(&self) -> StorageResult<bool> {
        let _guard = self.io.lock();
        self.remove_slot()
    }

    fn has_snapshot(&self) -> bool {
        self.path.exists()
    }
}
