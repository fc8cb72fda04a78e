//! File-backed preference store.
//!
//! Keeps all keys in one JSON object. A missing file is an empty store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use pricewise_core::currency::{PreferenceStore, StoreError};

type Entries = BTreeMap<String, String>;

/// Preference store persisted as a JSON file.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt(reason)) => {
                warn!(
                    path = %self.path.display(),
                    reason = %reason,
                    "Replacing corrupt preference file"
                );
                Entries::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}
