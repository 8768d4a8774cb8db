use crate::auth::models::UserContext;
use crate::constants::THUMBNAIL_FIELD;
use crate::error::HttpAppError;
use crate::handlers::resolve_video;
use crate::state::AppState;
use crate::utils::upload::{multipart_error, normalize_mime_type, parse_video_id, thumbnail_extension};
use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use bytes::{Bytes, BytesMut};
use std::sync::Arc;
use tubely_core::constants::THUMBNAIL_KEY_PREFIX;
use tubely_core::AppError;
use tubely_storage::build_key;

/// Read a field fully, failing as soon as more than `max_bytes` have arrived.
async fn read_bounded(mut field: Field<'_>, max_bytes: u64) -> Result<Bytes, AppError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buffer.len() + chunk.len()) as u64 > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Thumbnail exceeds the maximum size of {} MB",
                max_bytes / 1024 / 1024
            )));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}

/// `POST /api/thumbnails/{video_id}`: store a JPEG or PNG thumbnail through the object
/// store and reference it from the video record.
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "upload_thumbnail")
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let video = state.pipeline.authorize(video_id, user.user_id).await?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(normalize_mime_type)
            .unwrap_or_default();
        let extension = thumbnail_extension(&content_type)?;
        let data = read_bounded(field, state.config.max_thumbnail_size_bytes).await?;
        if data.is_empty() {
            return Err(AppError::InvalidInput("Thumbnail is empty".to_string()).into());
        }

        let key = build_key(THUMBNAIL_KEY_PREFIX, &state.ids.generate(), extension);
        let size_bytes = data.len();
        state.storage.put_bytes(&key, data, &content_type).await?;

        let descriptor = state.storage.access_descriptor(&key).to_stored();
        let updated = match state.repository.set_thumbnail_url(video.id, &descriptor).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(delete_err) = state.storage.delete(&key).await {
                    tracing::error!(
                        error = %delete_err,
                        key = %key,
                        "Failed to delete thumbnail after record update failure"
                    );
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            video_id = %updated.id,
            key = %key,
            size_bytes,
            content_type = %content_type,
            "Thumbnail published"
        );

        let response = resolve_video(&state, updated).await?;
        return Ok(Json(response));
    }

    Err(AppError::InvalidInput(format!("Missing form field '{}'", THUMBNAIL_FIELD)).into())
}
