//! Tubely Storage Library
//!
//! This crate provides the object store publisher used by the upload pipeline: the
//! [`Storage`] trait, an S3 backend that hands out presigned URLs and a local filesystem
//! backend that hands out static URLs.
//!
//! # Storage key format
//!
//! Videos are published under `{orientation}/{id}{ext}` and thumbnails under
//! `thumbnails/{id}{ext}`, where `id` is 64 lowercase hex characters. Keys never contain
//! `..` or a leading `/`. Key construction lives in the `keys` module so every backend
//! sees the same layout.

pub mod access;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use access::resolve_access_url;
pub use factory::create_storage;
pub use keys::{build_key, extension_of, IdGenerator, RandomHexIdGenerator, SequentialIdGenerator};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::{AccessDescriptor, StorageBackend};
