//! Storage effect trait.
//!
//! Byte-level, whole-value key/value storage. Typed records are layered on top
//! of this by the session crate's record gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Error type for storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum StorageError {
    #[error("Invalid key: {reason}")]
    InvalidKey { reason: String },
    #[error("Read failed: {0}")]
    ReadFailed(String),
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Durable key/value storage.
///
/// `store` must replace the previous value as a whole: a reader never observes
/// a partially written value.
#[async_trait]
pub trait StorageEffects: Send + Sync {
    /// Replace the value stored under `key`.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Read the value stored under `key`, `None` if nothing was stored.
    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Human-readable location of `key` (a file path for filesystem handlers).
    fn locate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Blanket implementation for Arc<T> where T: StorageEffects
#[async_trait]
impl<T: StorageEffects + ?Sized> StorageEffects for Arc<T> {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).store(key, value).await
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).retrieve(key).await
    }

    fn locate(&self, key: &str) -> String {
        (**self).locate(key)
    }
}
