//! Upload ingestion orchestration: stage → probe → classify → remux → publish → finalize.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use tubely_core::Video;
use tubely_db::VideoRepository;
use tubely_storage::{build_key, extension_of, IdGenerator, Storage};
use uuid::Uuid;

use super::error::IngestError;
use super::state::{IngestState, StateTracker};
use crate::staging::{StagingArea, StagingError};
use crate::video::{classify, rewritten_path, FastStartRewriter, MediaProber};

const STAGING_PREFIX: &str = "tubely-upload";
const PUBLISHED_CONTENT_TYPE: &str = "video/mp4";

/// Limits and locations for ingest runs.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub staging_dir: PathBuf,
    pub max_upload_bytes: u64,
}

/// One authenticated upload attempt.
pub struct UploadSession<S> {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub body: S,
    pub content_type: String,
    pub filename: String,
}

/// Sequences the ingest stages for one upload at a time. Runs share no mutable state,
/// so a single pipeline serves concurrent requests.
pub struct IngestPipeline {
    repository: Arc<dyn VideoRepository>,
    prober: Arc<dyn MediaProber>,
    rewriter: Arc<dyn FastStartRewriter>,
    storage: Arc<dyn Storage>,
    ids: Arc<dyn IdGenerator>,
    config: IngestConfig,
}

impl IngestPipeline {
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        prober: Arc<dyn MediaProber>,
        rewriter: Arc<dyn FastStartRewriter>,
        storage: Arc<dyn Storage>,
        ids: Arc<dyn IdGenerator>,
        config: IngestConfig,
    ) -> Self {
        Self {
            repository,
            prober,
            rewriter,
            storage,
            ids,
            config,
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Load the record and check that `user_id` owns it.
    #[tracing::instrument(skip(self))]
    pub async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, IngestError> {
        let video = self
            .repository
            .get_video(video_id)
            .await
            .map_err(IngestError::Lookup)?
            .ok_or(IngestError::VideoNotFound(video_id))?;

        if !video.is_owned_by(user_id) {
            return Err(IngestError::NotOwner { video_id, user_id });
        }

        Ok(video)
    }

    /// Run every stage for an upload against an already authorized `video`.
    ///
    /// Staged files are removed before this returns, on success and on every failure.
    /// A failure after publishing deletes the published object again.
    pub async fn ingest<S>(
        &self,
        video: Video,
        session: UploadSession<S>,
    ) -> Result<Video, IngestError>
    where
        S: Stream<Item = Result<Bytes, StagingError>>,
    {
        if video.id != session.video_id || !video.is_owned_by(session.user_id) {
            return Err(IngestError::NotOwner {
                video_id: session.video_id,
                user_id: session.user_id,
            });
        }

        let mut tracker = StateTracker::new(video.id);
        let mut staging = StagingArea::new(&self.config.staging_dir);

        tracing::info!(
            video_id = %video.id,
            user_id = %session.user_id,
            filename = %session.filename,
            content_type = %session.content_type,
            "Starting video ingest"
        );

        let result = self.run(&mut tracker, &mut staging, video, session).await;
        staging.finish();

        match &result {
            Ok(video) => tracing::info!(
                video_id = %video.id,
                duration_ms = tracker.elapsed_ms(),
                "Video ingest finished"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                failed_stage = e.stage(),
                last_state = %tracker.current(),
                duration_ms = tracker.elapsed_ms(),
                "Video ingest failed"
            ),
        }

        result
    }

    async fn run<S>(
        &self,
        tracker: &mut StateTracker,
        staging: &mut StagingArea,
        video: Video,
        session: UploadSession<S>,
    ) -> Result<Video, IngestError>
    where
        S: Stream<Item = Result<Bytes, StagingError>>,
    {
        let extension = extension_of(&session.filename);

        let raw = staging
            .stage_stream(
                STAGING_PREFIX,
                extension,
                session.body,
                self.config.max_upload_bytes,
            )
            .await?;
        tracker.advance(IngestState::Staged);

        let geometry = self
            .prober
            .probe(&raw.path)
            .await
            .map_err(IngestError::Probe)?;
        tracker.advance(IngestState::Probed);

        let orientation = classify(geometry.width, geometry.height);
        tracker.advance(IngestState::Classified);

        let expected = rewritten_path(&raw.path);
        staging.adopt(expected.clone());
        let rewritten = self
            .rewriter
            .remux(&raw.path)
            .await
            .map_err(IngestError::Remux)?;
        if rewritten != expected {
            staging.adopt(rewritten.clone());
        }
        tracker.advance(IngestState::Remuxed);

        let key = build_key(orientation.as_str(), &self.ids.generate(), extension);
        self.storage
            .publish(&rewritten, &key, PUBLISHED_CONTENT_TYPE)
            .await
            .map_err(IngestError::Publish)?;
        tracker.advance(IngestState::Published);

        let descriptor = self.storage.access_descriptor(&key).to_stored();
        let updated = match self.repository.set_video_url(video.id, &descriptor).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(delete_err) = self.storage.delete(&key).await {
                    tracing::error!(
                        error = %delete_err,
                        key = %key,
                        "Failed to delete published object after finalize failure"
                    );
                }
                return Err(IngestError::Finalize(e));
            }
        };
        tracker.advance(IngestState::Finalized);

        tracing::info!(
            video_id = %updated.id,
            key = %key,
            orientation = %orientation,
            width = geometry.width,
            height = geometry.height,
            size_bytes = raw.size_bytes,
            "Video published"
        );

        Ok(updated)
    }
}
