//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tubely_core::{AccessDescriptor, AppError};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

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

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// Objects are written once under a caller-chosen key and never mutated. A successful
/// `publish` or `put_bytes` is the durability boundary: once it returns, the object is
/// readable, and when it fails no partial object is visible under `key`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream a local file to the store under `key`. Returns the number of bytes written.
    async fn publish(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> StorageResult<u64>;

    /// Upload a small in-memory payload (thumbnails) under `key`.
    async fn put_bytes(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Delete a file by its storage key
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Pointer to persist for an object published under `key`.
    fn access_descriptor(&self, key: &str) -> AccessDescriptor;

    /// Presigned GET URL for `bucket`/`key` valid for `ttl`.
    ///
    /// Signing is computed locally: it performs no network round trip and does not
    /// touch the stored object. Backends without presigning return a `ConfigError`.
    async fn sign(&self, bucket: &str, key: &str, ttl: Duration) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
