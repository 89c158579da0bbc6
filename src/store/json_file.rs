// SPDX-License-Identifier: MIT

//! File-backed store: one JSON document per key under a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{PersistedStore, StoreError};

/// Stores each key as `<dir>/<key>.json`. Writes go to a temp file first and
/// are renamed into place so a crash mid-write never truncates the document.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        fs::create_dir_all(dir.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistedStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let text =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::Encode(e.to_string()))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, text).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(key, path = %path.display(), "Saved document");
        Ok(())
    }
}
