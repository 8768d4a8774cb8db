//! Shared key generation for storage backends.
//!
//! Key format: `{prefix}/{id}{ext}` where `id` comes from an [`IdGenerator`] and `ext` is
//! the original filename's extension including the dot.

use rand::RngCore;
use std::sync::atomic::{AtomicU64, Ordering};

const ID_BYTES: usize = 32;
const MAX_EXTENSION_LEN: usize = 16;

/// Source of object identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 32 random bytes rendered as 64 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomHexIdGenerator;

impl IdGenerator for RandomHexIdGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; ID_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic generator yielding `000…001`, `000…002`, … in the same 64-char shape.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:0width$x}", n, width = ID_BYTES * 2)
    }
}

/// Build a storage key under `prefix`.
pub fn build_key(prefix: &str, id: &str, extension: &str) -> String {
    format!("{}/{}{}", prefix, id, extension)
}

/// Extension of the final path component, dot included, or `""` when there is none.
///
/// Extensions that are not short and alphanumeric are dropped so a client-supplied
/// filename can never inject separators into a key.
pub fn extension_of(filename: &str) -> &str {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    match name.rfind('.') {
        Some(idx) => {
            let ext = &name[idx..];
            let body = &ext[1..];
            if !body.is_empty()
                && body.len() <= MAX_EXTENSION_LEN
                && body.chars().all(|c| c.is_ascii_alphanumeric())
            {
                ext
            } else {
                ""
            }
        }
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_64_hex_chars() {
        let generator = RandomHexIdGenerator;
        let a = generator.generate();
        let b = generator.generate();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let generator = SequentialIdGenerator::new();
        let first = generator.generate();
        assert_eq!(first.len(), 64);
        assert!(first.ends_with("01"));
        assert!(generator.generate().ends_with("02"));
    }

    #[test]
    fn test_build_key() {
        assert_eq!(build_key("landscape", "abc", ".mp4"), "landscape/abc.mp4");
        assert_eq!(build_key("other", "abc", ""), "other/abc");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("boots.mp4"), ".mp4");
        assert_eq!(extension_of("archive.tar.MP4"), ".MP4");
        assert_eq!(extension_of("no_extension"), "");
        assert_eq!(extension_of("dir.d/file"), "");
        assert_eq!(extension_of("C:\\clips\\boots.mov"), ".mov");
        assert_eq!(extension_of("evil.mp4/../x"), "");
        assert_eq!(extension_of("trailing."), "");
    }
}
