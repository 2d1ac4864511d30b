//! In-memory storage

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use super::{CartStorage, StorageError};

/// Process-local storage backed by a shared map.
///
/// Clones share the same map, so a cart reopened on a clone sees everything the
/// original wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<FxHashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with `bytes` under `key`.
    pub fn with_entry(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(key.into(), bytes.into());

        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_err| StorageError::Backend("memory storage lock poisoned".to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_err| StorageError::Backend("memory storage lock poisoned".to_string()))?;

        entries.insert(key.to_string(), bytes.to_vec());

        Ok(())
    }
}
