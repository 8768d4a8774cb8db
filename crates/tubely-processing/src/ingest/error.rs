use thiserror::Error;
use tubely_core::AppError;
use tubely_storage::StorageError;
use uuid::Uuid;

use crate::error::ProcessingError;
use crate::staging::StagingError;

/// Terminal failure of an ingest run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Video {0} not found")]
    VideoNotFound(Uuid),

    #[error("User {user_id} does not own video {video_id}")]
    NotOwner { video_id: Uuid, user_id: Uuid },

    #[error("Failed to load video record: {0}")]
    Lookup(#[source] AppError),

    #[error("Failed to stage upload: {0}")]
    Staging(#[from] StagingError),

    #[error("Failed to probe video: {0}")]
    Probe(#[source] ProcessingError),

    #[error("Failed to remux video: {0}")]
    Remux(#[source] ProcessingError),

    #[error("Failed to publish video: {0}")]
    Publish(#[source] StorageError),

    #[error("Failed to record published video: {0}")]
    Finalize(#[source] AppError),
}

impl IngestError {
    /// Name of the stage that failed, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            IngestError::VideoNotFound(_) | IngestError::NotOwner { .. } | IngestError::Lookup(_) => {
                "ownership"
            }
            IngestError::Staging(_) => "staging",
            IngestError::Probe(_) => "probe",
            IngestError::Remux(_) => "remux",
            IngestError::Publish(_) => "publish",
            IngestError::Finalize(_) => "finalize",
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::VideoNotFound(_) => AppError::NotFound("Video not found".to_string()),
            IngestError::NotOwner { .. } => {
                AppError::Unauthorized("Not the owner of this video".to_string())
            }
            IngestError::Lookup(e) => e,
            IngestError::Staging(StagingError::TooLarge { limit }) => AppError::PayloadTooLarge(
                format!("Upload exceeds the maximum size of {} MB", limit / 1024 / 1024),
            ),
            IngestError::Staging(StagingError::Read(msg)) => {
                AppError::InvalidInput(format!("Failed to read upload: {}", msg))
            }
            IngestError::Staging(StagingError::Io(e)) => {
                AppError::Internal(format!("Failed to stage upload: {}", e))
            }
            e @ (IngestError::Probe(_) | IngestError::Remux(_)) => {
                AppError::MediaProcessing(e.to_string())
            }
            IngestError::Publish(e) => AppError::Storage(e.to_string()),
            IngestError::Finalize(e) => AppError::InternalWithSource {
                message: "Failed to record published video".to_string(),
                source: anyhow::Error::new(e),
            },
        }
    }
}
