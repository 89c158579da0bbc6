// SPDX-License-Identifier: MIT

//! Persisted key-value store abstraction.
//!
//! The directory treats the store as best-effort durability: in-memory
//! state is the source of truth for the running process, every mutation is
//! written through, and a failed save is surfaced without rollback.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage keys as constants.
pub mod keys {
    pub const USERS: &str = "users";
}

/// Errors from the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failure: {0}")]
    Io(String),

    #[error("stored document is not valid JSON: {0}")]
    Decode(String),

    #[error("failed to encode document: {0}")]
    Encode(String),
}

/// Generic load/save over JSON documents. No transactions, no ordering
/// guarantees; each save replaces the whole value under the key.
pub trait PersistedStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if absent.
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Durably replace the value stored under `key`.
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;
}
