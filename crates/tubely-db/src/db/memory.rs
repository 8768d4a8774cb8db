use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tubely_core::{AppError, Video};
use uuid::Uuid;

use super::video::VideoRepository;

/// Process-local video store used when no `DATABASE_URL` is configured.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record, replacing any record with the same id.
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    async fn modify(&self, id: Uuid, apply: impl FnOnce(&mut Video)) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        apply(stored);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create_video(
        &self,
        user_id: Uuid,
        title: String,
        description: Option<String>,
    ) -> Result<Video, AppError> {
        let video = Video::new(user_id, title, description);
        self.insert(video.clone()).await;
        tracing::debug!(video_id = %video.id, "Video record created");
        Ok(video)
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn set_video_url(&self, id: Uuid, video_url: &str) -> Result<Video, AppError> {
        self.modify(id, |video| video.video_url = Some(video_url.to_string()))
            .await
    }

    async fn set_thumbnail_url(&self, id: Uuid, thumbnail_url: &str) -> Result<Video, AppError> {
        self.modify(id, |video| video.thumbnail_url = Some(thumbnail_url.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryVideoRepository::new();
        let user_id = Uuid::new_v4();
        let created = repo
            .create_video(user_id, "Boots".to_string(), None)
            .await
            .unwrap();

        let fetched = repo.get_video(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.is_owned_by(user_id));
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_video_url_persists() {
        let repo = InMemoryVideoRepository::new();
        let video = repo
            .create_video(Uuid::new_v4(), "Boots".to_string(), None)
            .await
            .unwrap();

        let updated = repo
            .set_video_url(video.id, "tubely-videos,landscape/abc.mp4")
            .await
            .unwrap();
        assert_eq!(updated.video_url.as_deref(), Some("tubely-videos,landscape/abc.mp4"));
        assert!(updated.updated_at >= video.created_at);
        assert_eq!(repo.get_video(video.id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_url_updates_do_not_clobber_each_other() {
        let repo = InMemoryVideoRepository::new();
        let video = repo
            .create_video(Uuid::new_v4(), "Boots".to_string(), None)
            .await
            .unwrap();

        // Both writers started from the same snapshot with no URLs set.
        repo.set_thumbnail_url(video.id, "tubely-videos,thumbnails/t.png")
            .await
            .unwrap();
        let updated = repo
            .set_video_url(video.id, "tubely-videos,portrait/v.mp4")
            .await
            .unwrap();

        assert_eq!(updated.thumbnail_url.as_deref(), Some("tubely-videos,thumbnails/t.png"));
        assert_eq!(updated.video_url.as_deref(), Some("tubely-videos,portrait/v.mp4"));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let err = repo
            .set_video_url(Uuid::new_v4(), "tubely-videos,landscape/abc.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = repo
            .set_thumbnail_url(Uuid::new_v4(), "tubely-videos,thumbnails/t.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
