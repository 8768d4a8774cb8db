//! API-level constants

pub use tubely_core::constants::API_PREFIX;

/// Multipart field carrying the uploaded video.
pub const VIDEO_FIELD: &str = "video";

/// Multipart field carrying the uploaded thumbnail.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// The only container accepted for video uploads.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Headroom above the largest file limit for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Lifetime of tokens minted by `issue_token` when the caller does not choose one.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;
