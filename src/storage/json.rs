//! JSON file-backed key-value store.
//!
//! All entries live in one human-readable JSON document that is loaded when the store
//! opens and rewritten with an atomic write (write-to-temp + rename) after every
//! change, so a crash never leaves a half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "productTableColumnOrder": "[\"checkbox\",\"rowNumber\",\"name\"]",
//!     "productTableRowsPerPage": "25"
//!   }
//! }
//! ```

use crate::domain::error::{ConsoleError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the file format for future migrations.
    version: u32,

    /// Sorted so rewrites of unchanged data produce identical files.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted to a JSON file.
///
/// This type is `Send` but not `Sync`; wrap it in a
/// [`SharedStore`](crate::storage::SharedStore) to hand it to several grids.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreData,
    dirty: bool,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but cannot be read
    /// - The file exists but does not contain a store document
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foldergrid::storage::{JsonFileStore, KeyValueStore};
    ///
    /// let mut store = JsonFileStore::open("/tmp/foldergrid/settings.json")?;
    /// store.set("productTableRowsPerPage", "25")?;
    /// # Ok::<(), foldergrid::ConsoleError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening key-value store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(entries = data.entries.len(), "key-value store ready");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| ConsoleError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version != FORMAT_VERSION {
            tracing::warn!(version = data.version, "unexpected store format version");
        }
        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ConsoleError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "key-value store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::trace_span!("kv_set", key = %key).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty store on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save store on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("customerTableRowsPerPage", "20").unwrap();
            store.set("customerTableSortConfig", "null").unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("customerTableRowsPerPage").unwrap().as_deref(), Some("20"));
        assert_eq!(store.get("customerTableSortConfig").unwrap().as_deref(), Some("null"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Storage(_)));
    }

    #[test]
    fn unchanged_value_skips_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        std::fs::remove_file(&path).unwrap();

        store.set("k", "v").unwrap();
        assert!(!path.exists());
    }
}
