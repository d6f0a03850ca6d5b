//! Download engine — per-episode state machine
//!
//! One invocation of [`download_episode`] takes an episode identifier
//! through metadata resolution, the skip-existing check, the chunked
//! transfer loop with optional real-time pacing, and post-download
//! conversion, producing exactly one [`DownloadOutcome`]. Transport errors
//! do not produce an outcome; they propagate to the caller.

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::convert::AudioConverter;
use crate::error::{Error, Result};
use crate::metadata;
use crate::pacer::RealTimePacer;
use crate::paths;
use crate::progress::{ProgressGuard, ProgressReporter};
use crate::types::{DownloadOutcome, EpisodeRef, SkipReason};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

/// A readable handle on one episode's audio content
#[async_trait]
pub trait ContentStream: Send {
    /// Total content size in bytes, as declared by the source
    fn total_size(&self) -> u64;

    /// Read up to `max` bytes. A zero-length result means end of stream,
    /// regardless of how many bytes the declared size still promises.
    async fn read_chunk(&mut self, max: usize) -> Result<Vec<u8>>;
}

/// Opens content streams for episodes.
///
/// The engine opens the stream only after metadata resolution succeeds, so
/// unknown episodes never touch the content source.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Open a fresh stream for the given episode
    async fn open(&self, id: &EpisodeRef) -> Result<Box<dyn ContentStream>>;
}

/// Result of one engine invocation
#[derive(Debug)]
pub struct DownloadReport {
    /// Terminal outcome of the attempt
    pub outcome: DownloadOutcome,
    /// The derived output path, present once metadata resolution succeeded
    pub path: Option<PathBuf>,
}

impl DownloadReport {
    fn pathless(outcome: DownloadOutcome) -> Self {
        Self {
            outcome,
            path: None,
        }
    }
}

/// Download one episode to disk.
///
/// Classified catalog failures (`NotFound`, error payloads) are recovered
/// into `Skipped`/`Failed` outcomes so a batch caller can continue with the
/// next episode. Cancellation is observed between chunks and yields
/// `Skipped { reason: Cancelled }`, leaving any partial file in place.
pub async fn download_episode(
    client: &dyn CatalogClient,
    provider: &dyn ContentProvider,
    converter: &dyn AudioConverter,
    progress: &dyn ProgressReporter,
    config: &Config,
    id: &EpisodeRef,
    cancel: &CancellationToken,
) -> Result<DownloadReport> {
    let meta = match metadata::resolve_episode(client, id).await {
        Ok(meta) => meta,
        Err(Error::NotFound(_)) => {
            return Ok(DownloadReport::pathless(DownloadOutcome::Skipped {
                reason: SkipReason::EpisodeNotFound,
            }));
        }
        Err(Error::ErrorResponse { message }) => {
            tracing::error!(%id, error = %message, "episode failed");
            return Ok(DownloadReport::pathless(DownloadOutcome::Failed {
                error: message,
            }));
        }
        Err(err) => return Err(err),
    };

    let path = paths::render_output_path(
        &config.root_dir,
        &config.output_template,
        &meta.show_name,
        &meta.episode_name,
        &meta.release_date,
        config.audio_format.ext(),
    );
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut stream = provider.open(id).await?;
    let total = stream.total_size();

    if config.skip_existing {
        if let Ok(existing) = tokio::fs::metadata(&path).await {
            if existing.is_file() && existing.len() == total {
                tracing::info!(%id, path = %path.display(), "file already exists, skipping");
                return Ok(DownloadReport {
                    outcome: DownloadOutcome::Skipped {
                        reason: SkipReason::AlreadyExists,
                    },
                    path: Some(path),
                });
            }
        }
    }

    tracing::info!(%id, path = %path.display(), total_bytes = total, "downloading episode");
    let mut file = tokio::fs::File::create(&path).await?;
    let guard = ProgressGuard::begin(progress, &path.display().to_string(), Some(total));
    let pacer = RealTimePacer::new(config.real_time_download, meta.duration_ms, total);

    let mut downloaded: u64 = 0;
    while downloaded < total {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => {
                file.flush().await?;
                tracing::warn!(%id, downloaded, "download cancelled, partial file left in place");
                return Ok(DownloadReport {
                    outcome: DownloadOutcome::Skipped {
                        reason: SkipReason::Cancelled,
                    },
                    path: Some(path),
                });
            }
            chunk = stream.read_chunk(config.chunk_size) => chunk?,
        };

        // Zero-length read means the stream ended early
        if chunk.is_empty() {
            break;
        }

        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        guard.advance(chunk.len() as u64);

        tokio::select! {
            _ = cancel.cancelled() => {
                file.flush().await?;
                tracing::warn!(%id, downloaded, "download cancelled, partial file left in place");
                return Ok(DownloadReport {
                    outcome: DownloadOutcome::Skipped {
                        reason: SkipReason::Cancelled,
                    },
                    path: Some(path),
                });
            }
            _ = pacer.pace(downloaded) => {}
        }
    }

    file.flush().await?;
    drop(file);
    drop(guard);

    converter.convert(&path).await?;
    tracing::info!(%id, downloaded, path = %path.display(), "episode download complete");
    Ok(DownloadReport {
        outcome: DownloadOutcome::Completed {
            bytes_written: downloaded,
        },
        path: Some(path),
    })
}
