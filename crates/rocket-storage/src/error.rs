//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// I/O failure while touching a record.
    #[error("Store I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl StorageError {
    /// Whether the stored bytes exist but could not be decoded.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::SerializeError(_))
    }
}
