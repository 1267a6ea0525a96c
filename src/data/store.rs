use {
    super::snapshot::Snapshot,
    crate::config::DF,
    std::{
        cell::RefCell,
        fs,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot could not be serialised: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where plan snapshots live. Loading never fails: anything unreadable is `None`.
pub trait SnapshotStore {
    fn load(&self) -> Option<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

/// Pretty-printed JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<Snapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", self.path.display(), e);
                }
                return None;
            }
        };
        let snapshot = Snapshot::parse(&raw);
        if DF.log_snapshot && snapshot.is_some() {
            log::info!("Loaded plan snapshot from {}", self.path.display());
        }
        snapshot
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).map_err(io_err)?;
        if DF.log_snapshot {
            log::info!("Saved plan snapshot to {}", self.path.display());
        }
        Ok(())
    }
}

/// Keeps the serialised blob in memory. Used by tests and `--no-save` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw blob, valid or not.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(raw.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        self.blob.borrow().as_deref().and_then(Snapshot::parse)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(snapshot)?;
        self.blob.replace(Some(json));
        Ok(())
    }
}
