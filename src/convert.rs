//! Post-download audio conversion
//!
//! The raw content stream arrives in whatever codec the catalog serves.
//! After a completed download, the engine hands the file to an
//! [`AudioConverter`] to transcode it to the configured format in place.

use crate::config::AudioFormat;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Converts a downloaded file to the target audio format in place
#[async_trait]
pub trait AudioConverter: Send + Sync {
    /// Transcode the file at `path`. On success the file at `path` holds the
    /// converted audio; on failure the original file is left untouched.
    async fn convert(&self, path: &Path) -> Result<()>;
}

/// An [`AudioConverter`] that leaves files exactly as downloaded
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpConverter;

#[async_trait]
impl AudioConverter for NoOpConverter {
    async fn convert(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Transcodes via an external `ffmpeg` binary.
///
/// The binary is located once at construction time; a missing binary is a
/// construction error rather than a per-download surprise.
#[derive(Clone, Debug)]
pub struct CliConverter {
    ffmpeg: PathBuf,
    format: AudioFormat,
}

impl CliConverter {
    /// Locate `ffmpeg` on `PATH` and build a converter for `format`
    pub fn new(format: AudioFormat) -> Result<Self> {
        let ffmpeg = which::which("ffmpeg")
            .map_err(|err| Error::Conversion(format!("ffmpeg not found on PATH: {err}")))?;
        Ok(Self { ffmpeg, format })
    }

    /// Build a converter with an explicit ffmpeg binary path
    pub fn with_binary(ffmpeg: impl Into<PathBuf>, format: AudioFormat) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            format,
        }
    }

    fn temp_output(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".convert.tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl AudioConverter for CliConverter {
    async fn convert(&self, path: &Path) -> Result<()> {
        let temp = Self::temp_output(path);
        tracing::debug!(input = %path.display(), format = self.format.ext(), "converting audio");

        let output = Command::new(&self.ffmpeg)
            .arg("-y")
            .arg("-i")
            .arg(path)
            .arg("-f")
            .arg(self.format.ext())
            .arg(&temp)
            .output()
            .await
            .map_err(|err| Error::Conversion(format!("failed to run ffmpeg: {err}")))?;

        if !output.status.success() {
            // Leave the original file in place for inspection
            let _ = tokio::fs::remove_file(&temp).await;
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Conversion(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tokio::fs::rename(&temp, path).await?;
        Ok(())
    }
}
