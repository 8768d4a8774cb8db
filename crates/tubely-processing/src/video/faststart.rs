//! Stream-copy remux that moves the `moov` atom to the front of an MP4.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::command::ToolCommand;
use crate::error::ProcessingResult;

const OUTPUT_SUFFIX: &str = ".processing";

/// Rewrites a container for progressive playback without re-encoding.
///
/// The input is left untouched and the rewritten file is written next to it at
/// [`rewritten_path`]. The caller owns and removes the output.
#[async_trait]
pub trait FastStartRewriter: Send + Sync {
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf>;
}

/// Sibling output path: `{input}.processing`.
pub fn rewritten_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_os_string();
    path.push(OUTPUT_SUFFIX);
    PathBuf::from(path)
}

/// `ffmpeg -y -i <in> -c copy -movflags faststart -f mp4 <out>`
pub fn faststart_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args = vec![OsString::from("-y"), OsString::from("-i")];
    args.push(input.as_os_str().to_os_string());
    args.extend(
        ["-c", "copy", "-movflags", "faststart", "-f", "mp4"]
            .iter()
            .map(OsString::from),
    );
    args.push(output.as_os_str().to_os_string());
    args
}

/// A rewriter backed by the `ffmpeg` CLI.
#[derive(Debug, Clone)]
pub struct FfmpegFastStart {
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl FfmpegFastStart {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl FastStartRewriter for FfmpegFastStart {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        ffmpeg.operation = "faststart"
    ))]
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf> {
        let start = std::time::Instant::now();
        let output = rewritten_path(input);

        ToolCommand::new(self.ffmpeg_path.clone())
            .args(faststart_args(input, &output))
            .timeout(self.timeout)
            .execute()
            .await?;

        tracing::info!(
            output = %output.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fast-start remux completed"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;

    #[test]
    fn test_rewritten_path_is_sibling() {
        assert_eq!(
            rewritten_path(Path::new("/tmp/tubely-upload-abc.mp4")),
            PathBuf::from("/tmp/tubely-upload-abc.mp4.processing")
        );
    }

    #[test]
    fn test_faststart_args() {
        let args = faststart_args(Path::new("/tmp/in.mp4"), Path::new("/tmp/in.mp4.processing"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "/tmp/in.mp4",
                "-c",
                "copy",
                "-movflags",
                "faststart",
                "-f",
                "mp4",
                "/tmp/in.mp4.processing"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_fails() {
        let rewriter = FfmpegFastStart::new("/nonexistent/ffmpeg", Duration::from_secs(5));
        let result = rewriter.remux(Path::new("/tmp/missing.mp4")).await;
        assert!(matches!(result, Err(ProcessingError::Tool { .. })));
    }
}
