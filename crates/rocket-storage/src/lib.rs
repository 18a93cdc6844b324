//! Durable key-value storage for Rocket cart state.
//!
//! Provides a small storage abstraction with automatic JSON serialization,
//! playing the role a browser's local storage plays for a storefront UI.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_storage::{storage_key, FileStorage, StorageExt};
//!
//! let storage = FileStorage::open(".cart")?;
//! let key = storage_key!("@App", "cart");
//!
//! // Store a value
//! storage.set(&key, &products)?;
//!
//! // Retrieve a value
//! let products: Option<Vec<Product>> = storage.get(&key)?;
//!
//! // Delete a value
//! storage.delete(&key)?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use kv::{Storage, StorageExt};
pub use memory::MemoryStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStorage, MemoryStorage, Storage, StorageError, StorageExt};
}
