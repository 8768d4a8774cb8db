//! Common utilities for upload handlers

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use tubely_core::AppError;
use tubely_processing::StagingError;
use uuid::Uuid;

/// Normalize MIME type by stripping parameters and case
/// (e.g. "Video/MP4; codecs=avc1" -> "video/mp4").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_ascii_lowercase()
}

/// Parse a video id taken from the request path.
pub fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidInput("Invalid video ID".to_string()))
}

/// Map a failure to read the multipart envelope onto a client error.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body is too large".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Map a failure while streaming a field's bytes into the staging error space.
pub fn field_read_error(err: MultipartError, limit: u64) -> StagingError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        StagingError::TooLarge { limit }
    } else {
        StagingError::Read(err.body_text())
    }
}

/// Validate an image MIME type for thumbnails and return its file extension.
pub fn thumbnail_extension(content_type: &str) -> Result<&'static str, AppError> {
    match normalize_mime_type(content_type).as_str() {
        "image/jpeg" | "image/jpg" => Ok(".jpg"),
        "image/png" => Ok(".png"),
        _ => Err(AppError::InvalidInput(
            "Invalid content type. Allowed types: image/jpeg, image/png".to_string(),
        )),
    }
}
