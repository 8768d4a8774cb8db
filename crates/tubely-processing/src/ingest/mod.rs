//! Upload ingestion: staging, probing, classification, remux, publish and finalize.

mod error;
mod pipeline;
mod state;

pub use error::IngestError;
pub use pipeline::{IngestConfig, IngestPipeline, UploadSession};
pub use state::IngestState;
