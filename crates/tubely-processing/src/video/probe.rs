//! ffprobe-backed stream geometry extraction.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;
use crate::error::{ProcessingError, ProcessingResult};

/// Pixel dimensions of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamGeometry {
    pub width: u32,
    pub height: u32,
}

/// Reads the geometry of a local media file.
#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamGeometry>;
}

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }
}

/// `ffprobe -v error -print_format json -show_streams <path>`
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-print_format", "json", "-show_streams"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_os_string());
    args
}

#[async_trait]
impl MediaProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamGeometry> {
        let start = std::time::Instant::now();

        let output = ToolCommand::new(self.ffprobe_path.clone())
            .args(probe_args(path))
            .timeout(self.timeout)
            .execute()
            .await?;

        let geometry = parse_probe_output(&output.stdout)?;

        tracing::info!(
            width = geometry.width,
            height = geometry.height,
            duration_ms = start.elapsed().as_millis() as u64,
            "Video probe completed"
        );

        Ok(geometry)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
}

impl FfprobeStream {
    fn is_video(&self) -> bool {
        match self.codec_type.as_deref() {
            Some(kind) => kind == "video",
            None => self.width.is_some() && self.height.is_some(),
        }
    }
}

/// Extract the geometry of the first video stream from ffprobe's JSON document.
///
/// The first stream tagged `codec_type: "video"` wins; untagged streams qualify when they
/// carry dimensions. A missing stream or a non-positive dimension is
/// [`ProcessingError::NoVideoStream`].
pub fn parse_probe_output(stdout: &[u8]) -> ProcessingResult<StreamGeometry> {
    let output: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| ProcessingError::ProbeOutput(format!("ffprobe JSON parse error: {e}")))?;

    let stream = output
        .streams
        .iter()
        .find(|s| s.is_video())
        .ok_or(ProcessingError::NoVideoStream)?;

    let dimension = |value: Option<i64>| {
        value
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
    };

    match (dimension(stream.width), dimension(stream.height)) {
        (Some(width), Some(height)) => Ok(StreamGeometry { width, height }),
        _ => Err(ProcessingError::NoVideoStream),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_args() {
        let args = probe_args(Path::new("/tmp/tubely-upload-1.mp4"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec![
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "/tmp/tubely-upload-1.mp4"
            ]
        );
    }

    #[test]
    fn test_first_video_stream_used() {
        let json = br#"{
            "streams": [
                {"index": 0, "codec_type": "audio", "codec_name": "aac"},
                {"index": 1, "codec_type": "video", "width": 1280, "height": 720},
                {"index": 2, "codec_type": "video", "width": 640, "height": 360}
            ]
        }"#;
        assert_eq!(
            parse_probe_output(json).unwrap(),
            StreamGeometry {
                width: 1280,
                height: 720
            }
        );
    }

    #[test]
    fn test_untagged_stream_with_dimensions() {
        let json = br#"{"streams": [{"width": 1080, "height": 1920}]}"#;
        assert_eq!(
            parse_probe_output(json).unwrap(),
            StreamGeometry {
                width: 1080,
                height: 1920
            }
        );
    }

    #[test]
    fn test_empty_stream_list_is_no_video_stream() {
        assert!(matches!(
            parse_probe_output(br#"{"streams": []}"#),
            Err(ProcessingError::NoVideoStream)
        ));
        assert!(matches!(
            parse_probe_output(br#"{}"#),
            Err(ProcessingError::NoVideoStream)
        ));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let json = br#"{"streams": [{"codec_type": "video", "width": 1280, "height": 0}]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProcessingError::NoVideoStream)
        ));

        let json = br#"{"streams": [{"codec_type": "video"}]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProcessingError::NoVideoStream)
        ));
    }

    #[test]
    fn test_garbage_output_is_probe_error() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProcessingError::ProbeOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_fails() {
        let prober = FfprobeProber::new("/nonexistent/ffprobe", Duration::from_secs(5));
        let result = prober.probe(Path::new("/tmp/missing.mp4")).await;
        assert!(matches!(result, Err(ProcessingError::Tool { .. })));
    }
}
