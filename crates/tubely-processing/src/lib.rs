//! Tubely media processing
//!
//! The upload ingestion pipeline and the pieces it is assembled from: a staging area for
//! request-scoped temp files, an ffprobe-backed geometry prober, the orientation
//! classifier and an ffmpeg fast-start remuxer.

pub mod command;
pub mod error;
pub mod ingest;
pub mod staging;
pub mod video;

pub use command::{ToolCommand, ToolOutput};
pub use error::{ProcessingError, ProcessingResult};
pub use ingest::{IngestConfig, IngestError, IngestPipeline, IngestState, UploadSession};
pub use staging::{StagedFile, StagingArea, StagingError};
pub use video::{
    classify, rewritten_path, FastStartRewriter, FfmpegFastStart, FfprobeProber, MediaProber,
    Orientation, StreamGeometry,
};
