//! Application-wide constants

use std::time::Duration;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api";

/// Default upper bound for a single video upload (1 GiB).
pub const DEFAULT_MAX_VIDEO_SIZE_MB: u64 = 1024;

/// Default upper bound for a thumbnail upload (10 MiB).
pub const DEFAULT_MAX_THUMBNAIL_SIZE_MB: u64 = 10;

/// Lifetime of presigned GET URLs handed to clients.
pub const DEFAULT_PRESIGNED_URL_TTL: Duration = Duration::from_secs(30 * 60);

/// Wall-clock budget for a single ffprobe/ffmpeg invocation.
pub const DEFAULT_MEDIA_TOOL_TIMEOUT_SECS: u64 = 600;

/// Key prefix for published thumbnails.
pub const THUMBNAIL_KEY_PREFIX: &str = "thumbnails";

/// Issuer claim carried by access tokens.
pub const JWT_ISSUER: &str = "tubely-access";
