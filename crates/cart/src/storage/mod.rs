//! Key-value storage contract and backends.
//!
//! The cart treats storage as an opaque asynchronous blob store: one key, one
//! value, last write wins. Backends:
//!
//! - [`FileStore`] - one file per key in a directory, atomic replace on write
//! - [`MemoryStore`] - in-process map with failure injection for tests

mod fs;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FileStore;
pub use memory::MemoryStore;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        /// Key being read or written.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous key-value blob store.
///
/// `get` returns `Ok(None)` when the key has never been written; `Err` is
/// reserved for real failures (permissions, disk, injected faults).
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
