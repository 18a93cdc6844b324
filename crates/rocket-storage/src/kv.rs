//! Storage trait with automatic serialization.

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};

/// A durable byte-oriented key-value store.
///
/// Implementations must make a completed `set_raw` visible to every later
/// `get_raw` on the same key, including after a process restart for
/// persistent backends.
pub trait Storage: Send + Sync {
    /// Get the raw bytes stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite the record stored under `key`.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete a record. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// Typed JSON access for any [`Storage`], including `dyn Storage`.
pub trait StorageExt: Storage {
    /// Get a value from storage.
    ///
    /// Returns `None` if the key doesn't exist and
    /// [`StorageError::SerializeError`] if the record is malformed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<Product>> = storage.get("@App:cart")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in storage.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// storage.set("@App:cart", &products)?;
    /// ```
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = storage_key!("@App", "cart");
/// // Returns "@App:cart"
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: i64,
        amount: i64,
    }

    #[test]
    fn test_storage_key_macro() {
        assert_eq!(storage_key!("@App", "cart"), "@App:cart");
        assert_eq!(storage_key!("@App", "cart", 7), "@App:cart:7");
    }

    #[test]
    fn test_typed_get_missing_is_none() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<Line>> = storage.get("@App:cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_typed_set_then_get() {
        let storage = MemoryStorage::new();
        let lines = vec![Line { id: 1, amount: 2 }, Line { id: 3, amount: 1 }];
        storage.set("@App:cart", &lines).unwrap();

        let loaded: Vec<Line> = storage.get("@App:cart").unwrap().unwrap();
        assert_eq!(loaded, lines);
    }

    #[test]
    fn test_typed_get_malformed_is_corrupt() {
        let storage = MemoryStorage::new();
        storage.set_raw("@App:cart", b"{not json").unwrap();

        let err = storage.get::<Vec<Line>>("@App:cart").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_ext_works_through_dyn() {
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.set("k", &Line { id: 9, amount: 4 }).unwrap();
        assert!(storage.exists("k").unwrap());
        assert_eq!(
            storage.get::<Line>("k").unwrap(),
            Some(Line { id: 9, amount: 4 })
        );
    }
}
