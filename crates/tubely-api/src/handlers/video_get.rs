use crate::auth::models::UserContext;
use crate::error::HttpAppError;
use crate::handlers::resolve_video;
use crate::state::AppState;
use crate::utils::upload::parse_video_id;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[tracing::instrument(
    skip(state),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "get_video")
)]
pub async fn get_video(
    user: UserContext,
    Path(video_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let video = state.pipeline.authorize(video_id, user.user_id).await?;

    let response = resolve_video(&state, video).await?;
    Ok(Json(response))
}
