//! Storage
//!
//! The durable key-value byte store the cart mirrors itself into.

use std::sync::Arc;

use mockall::automock;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Any other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable key-value byte store.
///
/// Reads and writes complete before returning; a successful `write` means the
/// bytes will be seen by the next `read` of the same key.
#[automock]
pub trait CartStorage: Send + Sync {
    /// Read the bytes stored under `key`, `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the bytes stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, bytes)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, bytes)
    }
}
