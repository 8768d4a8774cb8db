use crate::auth::models::UserContext;
use crate::constants::{VIDEO_CONTENT_TYPE, VIDEO_FIELD};
use crate::error::HttpAppError;
use crate::handlers::resolve_video;
use crate::state::AppState;
use crate::utils::upload::{field_read_error, multipart_error, normalize_mime_type, parse_video_id};
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use futures::StreamExt;
use std::sync::Arc;
use tubely_core::AppError;
use tubely_processing::UploadSession;

/// `POST /api/videos/{video_id}`: ingest the MP4 in the `video` field and publish it.
///
/// Ownership is checked before any of the body is read, and the content type before
/// anything is staged.
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "upload_video")
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let video = state.pipeline.authorize(video_id, user.user_id).await?;
    let limit = state.pipeline.config().max_upload_bytes;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(normalize_mime_type)
            .unwrap_or_default();
        if content_type != VIDEO_CONTENT_TYPE {
            return Err(AppError::InvalidInput(format!(
                "Invalid content type. Allowed types: {}",
                VIDEO_CONTENT_TYPE
            ))
            .into());
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let session = UploadSession {
            video_id,
            user_id: user.user_id,
            content_type,
            filename,
            body: field.map(move |chunk| chunk.map_err(|e| field_read_error(e, limit))),
        };

        let updated = state.pipeline.ingest(video, session).await?;
        let response = resolve_video(&state, updated).await?;
        return Ok(Json(response));
    }

    Err(AppError::InvalidInput(format!("Missing form field '{}'", VIDEO_FIELD)).into())
}
