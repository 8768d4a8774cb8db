pub mod health;
pub mod thumbnail_upload;
pub mod video_get;
pub mod video_upload;

use crate::state::AppState;
use tubely_core::{AppError, Video, VideoResponse};
use tubely_storage::resolve_access_url;

/// Build the client view of `video`, turning stored descriptors into fetchable URLs.
pub(crate) async fn resolve_video(state: &AppState, video: Video) -> Result<VideoResponse, AppError> {
    let ttl = state.config.presigned_url_ttl;

    let video_url = match video.video_url.as_deref() {
        Some(stored) => Some(resolve_access_url(state.storage.as_ref(), stored, ttl).await?),
        None => None,
    };
    let thumbnail_url = match video.thumbnail_url.as_deref() {
        Some(stored) => Some(resolve_access_url(state.storage.as_ref(), stored, ttl).await?),
        None => None,
    };

    Ok(VideoResponse::with_urls(video, video_url, thumbnail_url))
}
