// UniAIMS - platform/store.rs
//
// File-backed key-value store for UI preferences (the sticky analysis mode).
//
// - The store is a flat JSON object of string keys to string values.
// - Loading is lenient: a missing or corrupt file yields an empty store.
// - Every `set` is written through atomically (write temp, rename), so a
//   crash never leaves a half-written store behind.

use crate::app::navigation::ModeStore;
use crate::util::error::StoreError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if it cannot be read.
    pub fn open(path: &Path) -> Self {
        let values = load(path).unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current values to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        save(&self.values, &self.path)
    }
}

impl ModeStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
        // A failed write only loses the preference; the UI keeps working.
        if let Err(e) = self.flush() {
            tracing::warn!(key, error = %e, "Could not persist preference");
        }
    }
}

/// Save `values` to `path` atomically (write temp, then rename).
pub fn save(values: &BTreeMap<String, String>, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json =
        serde_json::to_string_pretty(values).map_err(|e| StoreError::Serialise { source: e })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| StoreError::Write {
        path: tmp.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::debug!(path = %path.display(), keys = values.len(), "Store saved");
    Ok(())
}

/// Load the store, or `None` if the file is missing or malformed.
pub fn load(path: &Path) -> Option<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read store file");
            }
        })
        .ok()?;

    let values: BTreeMap<String, String> = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Store file is malformed, starting empty"
            );
        })
        .ok()?;

    tracing::debug!(path = %path.display(), keys = values.len(), "Store loaded");
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("uniaims_mode"), None);
        store.set("uniaims_mode", "fiber");
        assert!(path.exists());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("uniaims_mode").as_deref(), Some("fiber"));
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"[1, 2, 3").unwrap();
        let store = FileStore::open(&path);
        assert_eq!(store.get("uniaims_mode"), None);
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_leftover_temp_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut store = FileStore::open(&path);
        store.set("uniaims_mode", "particle");
        store.set("other", "x");

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.get("uniaims_mode").map(String::as_str), Some("particle"));
        assert_eq!(loaded.len(), 2);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
