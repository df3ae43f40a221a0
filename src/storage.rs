//! Durable storage for the board snapshot
//!
//! The whole store is written as one JSON document on every mutation:
//!
//! ```text
//! <data_dir>/
//!   taskboard.toml       # Optional configuration
//!   state.json           # Snapshot: { "tasks": [...], "columns": [...] }
//!   state.json.lock      # Advisory lock sidecar
//! ```
//!
//! The file stem (`state`) is the configurable storage key.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::ProjectDirs;

use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::Snapshot;

/// Environment override for the data directory
pub const DATA_DIR_ENV: &str = "TASKBOARD_DATA_DIR";

/// Default storage key (file stem of the snapshot)
pub const DEFAULT_KEY: &str = "state";

/// Where the store sends its snapshot after each mutation.
pub trait Persistence {
    /// Read the stored snapshot. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Platform data directory, e.g. `~/.local/share/taskboard`.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "taskboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| Error::Storage("could not determine a home directory".to_string()))
}

/// JSON file storage under a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
    key: String,
    lock_timeout_ms: u64,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            key: key.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn from_config(data_dir: impl Into<PathBuf>, config: &StorageConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            key: config.key.clone(),
            lock_timeout_ms: config.lock_timeout_ms,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Path to the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.key))
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }
}

impl Persistence for FileStorage {
    fn load(&self) -> Result<Option<Snapshot>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = lock::read_locked_str(&path, self.lock_timeout_ms)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        lock::write_atomic_locked(self.snapshot_path(), json.as_bytes(), self.lock_timeout_ms)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    blob: RefCell<Option<String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

/// In-process storage holding the serialized blob.
///
/// Clones share the same blob, so a test can keep a handle while the store
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemoryInner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a raw blob, valid JSON or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.inner.blob.replace(Some(blob.into()));
        storage
    }

    pub fn blob(&self) -> Option<String> {
        self.inner.blob.borrow().clone()
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.inner.writes.get()
    }

    /// Make every following save fail, as a full or disabled disk would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Result<Option<Snapshot>> {
        match self.inner.blob.borrow().as_deref() {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.inner.fail_writes.get() {
            return Err(Error::Storage("storage quota exceeded".to_string()));
        }
        let blob = serde_json::to_string(snapshot)?;
        self.inner.blob.replace(Some(blob));
        self.inner.writes.set(self.inner.writes.get() + 1);
        Ok(())
    }
}
