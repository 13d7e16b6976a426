//! Key-value storage backends.

use std::collections::HashMap;

use super::StoreResult;

/// A named-key string store. The record store keeps the whole collection
/// under one key, so two operations are all a backend has to provide.
pub trait StorageBackend {
    /// Read the value under `key`, `None` when the key is absent.
    fn read_key(&self, key: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite the value under `key`.
    fn write_key(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory backend (for testing and ephemeral sessions).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read_key(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write_key(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.into(), value.into());
        Ok(())
    }
}
