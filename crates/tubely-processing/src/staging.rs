//! Request-scoped temp files.
//!
//! A [`StagingArea`] owns every local file a single upload creates. Paths are held as
//! [`TempPath`]s, so they are removed when the area is finished or dropped, whichever
//! comes first, and never outlive the request.

use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tempfile::TempPath;
use thiserror::Error;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Staging I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Upload exceeds the limit of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Failed to read upload body: {0}")]
    Read(String),
}

/// A file written into the staging area.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

pub struct StagingArea {
    dir: PathBuf,
    files: Vec<TempPath>,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths currently owned by this area.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|p| p.to_path_buf()).collect()
    }

    /// Create a uniquely named empty file and register it for deletion.
    pub fn acquire(
        &mut self,
        prefix: &str,
        suffix: &str,
    ) -> Result<(tokio::fs::File, PathBuf), StagingError> {
        let (file, temp_path) = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(&self.dir)?
            .into_parts();

        let path = temp_path.to_path_buf();
        self.files.push(temp_path);
        Ok((tokio::fs::File::from_std(file), path))
    }

    /// Register a path derived from a staged file (e.g. a tool's output) for deletion.
    /// The file does not need to exist yet.
    pub fn adopt(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.files.iter().any(|p| **p == *path) {
            return;
        }
        self.files.push(TempPath::from_path(path));
    }

    /// Copy `stream` chunk by chunk into a fresh staged file, failing once more than
    /// `max_bytes` have been received. The file is synced and rewound before it is
    /// handed to later stages.
    pub async fn stage_stream<S>(
        &mut self,
        prefix: &str,
        suffix: &str,
        stream: S,
        max_bytes: u64,
    ) -> Result<StagedFile, StagingError>
    where
        S: Stream<Item = Result<Bytes, StagingError>>,
    {
        let (mut file, path) = self.acquire(prefix, suffix)?;
        futures::pin_mut!(stream);

        let mut size_bytes: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            size_bytes += chunk.len() as u64;
            if size_bytes > max_bytes {
                return Err(StagingError::TooLarge { limit: max_bytes });
            }
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        file.sync_all().await?;
        file.seek(SeekFrom::Start(0)).await?;

        tracing::debug!(path = %path.display(), size_bytes, "Upload staged");

        Ok(StagedFile { path, size_bytes })
    }

    /// Delete every registered path exactly once.
    pub fn finish(self) {
        for temp_path in self.files {
            let path = temp_path.to_path_buf();
            if let Err(e) = temp_path.close() {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to remove staged file");
                }
            }
        }
    }
}
