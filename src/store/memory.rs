// SPDX-License-Identifier: MIT

//! In-memory store used for tests and offline mode.

use dashmap::DashMap;

use crate::store::{PersistedStore, StoreError};

/// Keeps documents in a process-local map. Never fails.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct peek at a stored document, for assertions in tests.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Pre-populate a document, for seeding legacy data in tests.
    pub fn put(&self, key: &str, value: serde_json::Value) {
        self.entries.insert(key.to_string(), value);
    }
}

impl PersistedStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
