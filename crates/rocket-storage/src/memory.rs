//! Process-local storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Storage, StorageError};

/// In-memory storage backend.
///
/// Clones share the same underlying map, so a clone handed to a store and
/// one kept by a test observe the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if no records are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::StoreError("memory store lock poisoned".to_string())
}

impl Storage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(key);
        Ok(())
    }
}
