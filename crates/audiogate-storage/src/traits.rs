//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// A put-object sink addressed by key. Implementations must be safe to share
/// between concurrent requests. Dropping a pending future cancels the write.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Durably write `data` under `storage_key`.
    ///
    /// The buffer is handed over by value so backends can pass it on without
    /// copying. An existing object under the same key is replaced.
    async fn put(&self, storage_key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL for an object, when the backend can construct one.
    fn object_url(&self, storage_key: &str) -> Option<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
