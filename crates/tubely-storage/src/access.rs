//! Read-time resolution of persisted access descriptors.

use crate::traits::{Storage, StorageError, StorageResult};
use std::time::Duration;
use tubely_core::AccessDescriptor;

/// Turn a stored descriptor into a URL a client can fetch.
///
/// Composite descriptors are signed afresh on every call; static URLs are returned as-is.
pub async fn resolve_access_url(
    storage: &dyn Storage,
    stored: &str,
    ttl: Duration,
) -> StorageResult<String> {
    let descriptor: AccessDescriptor = stored
        .parse()
        .map_err(|e: tubely_core::ParseAccessDescriptorError| StorageError::InvalidKey(e.to_string()))?;

    match descriptor {
        AccessDescriptor::Composite { bucket, key } => storage.sign(&bucket, &key, ttl).await,
        AccessDescriptor::Static(url) => Ok(url),
    }
}
