//! Stand-ins for ffprobe/ffmpeg so tests run without the media tools installed.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tubely_processing::{
    rewritten_path, FastStartRewriter, MediaProber, ProcessingError, ProcessingResult,
    StreamGeometry,
};

/// Reports a fixed geometry for any staged file.
pub struct FixedProber {
    pub geometry: StreamGeometry,
}

impl FixedProber {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            geometry: StreamGeometry { width, height },
        }
    }
}

#[async_trait]
impl MediaProber for FixedProber {
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamGeometry> {
        if !path.exists() {
            return Err(ProcessingError::ProbeOutput(format!(
                "{} does not exist",
                path.display()
            )));
        }
        Ok(self.geometry)
    }
}

/// "Remuxes" by copying the input to the path ffmpeg would write.
pub struct CopyRewriter;

#[async_trait]
impl FastStartRewriter for CopyRewriter {
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf> {
        let output = rewritten_path(input);
        tokio::fs::copy(input, &output)
            .await
            .map_err(|e| ProcessingError::Tool {
                tool: "ffmpeg".to_string(),
                message: e.to_string(),
            })?;
        Ok(output)
    }
}
