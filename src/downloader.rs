//! High-level downloader facade
//!
//! [`PodcastDownloader`] wires the catalog client, download engine,
//! converter, and progress reporting together behind one handle. It is
//! cheap to clone; clones share the catalog client, HTTP pool, and event
//! channel.

use crate::catalog::{CatalogClient, HttpCatalogClient};
use crate::config::Config;
use crate::convert::{AudioConverter, NoOpConverter};
use crate::engine::{self, ContentProvider};
use crate::error::Result;
use crate::fetch;
use crate::lister;
use crate::metadata::{self, EpisodeMetadata};
use crate::progress::{NoopProgress, ProgressReporter};
use crate::types::{DownloadOutcome, EpisodeRef, Event, SkipReason};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// High-level handle for listing and downloading podcast episodes
#[derive(Clone)]
pub struct PodcastDownloader {
    config: Arc<Config>,
    catalog: Arc<dyn CatalogClient>,
    converter: Arc<dyn AudioConverter>,
    progress: Arc<dyn ProgressReporter>,
    http: reqwest::Client,
    event_tx: broadcast::Sender<Event>,
}

impl PodcastDownloader {
    /// Create a downloader over an injected catalog client.
    ///
    /// Validates the configuration up front. Progress reporting and
    /// conversion default to no-ops; see [`with_progress`](Self::with_progress)
    /// and [`with_converter`](Self::with_converter).
    pub fn new(config: Config, catalog: Arc<dyn CatalogClient>) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            config: Arc::new(config),
            catalog,
            converter: Arc::new(NoOpConverter),
            progress: Arc::new(NoopProgress),
            http,
            event_tx,
        })
    }

    /// Create a downloader talking HTTP to the catalog at `base_url`
    pub fn connect(base_url: &str, config: Config) -> Result<Self> {
        let catalog = Arc::new(HttpCatalogClient::new(base_url, config.request_timeout)?);
        Self::new(config, catalog)
    }

    /// Replace the progress reporter
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the post-download audio converter
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn AudioConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Subscribe to lifecycle events.
    ///
    /// Slow subscribers may miss events; the channel drops the oldest
    /// entries when its buffer fills.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn emit(&self, event: Event) {
        // Nobody listening is fine
        let _ = self.event_tx.send(event);
    }

    /// Enumerate every episode of a show, oldest-offset first
    pub async fn list_episodes(&self, show_id: &str) -> Result<Vec<EpisodeRef>> {
        let episodes = lister::list_episodes(self.catalog.as_ref(), show_id).await?;
        self.emit(Event::Listed {
            show_id: show_id.to_string(),
            count: episodes.len(),
        });
        Ok(episodes)
    }

    /// Fetch and classify one episode's metadata
    pub async fn resolve_episode(&self, id: &EpisodeRef) -> Result<EpisodeMetadata> {
        metadata::resolve_episode(self.catalog.as_ref(), id).await
    }

    /// Download one episode, emitting a lifecycle event for the outcome.
    ///
    /// Catalog-level failures come back as `Skipped`/`Failed` outcomes;
    /// transport and I/O errors propagate as `Err`.
    pub async fn download_episode(
        &self,
        id: &EpisodeRef,
        provider: &dyn ContentProvider,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        let report = engine::download_episode(
            self.catalog.as_ref(),
            provider,
            self.converter.as_ref(),
            self.progress.as_ref(),
            &self.config,
            id,
            cancel,
        )
        .await;

        match &report {
            Ok(report) => match &report.outcome {
                DownloadOutcome::Skipped { reason } => self.emit(Event::Skipped {
                    id: id.clone(),
                    reason: *reason,
                }),
                DownloadOutcome::Completed { bytes_written } => self.emit(Event::Completed {
                    id: id.clone(),
                    bytes_written: *bytes_written,
                    path: report.path.clone().unwrap_or_default(),
                }),
                DownloadOutcome::Failed { error } => self.emit(Event::Failed {
                    id: id.clone(),
                    error: error.clone(),
                }),
            },
            Err(err) => self.emit(Event::Failed {
                id: id.clone(),
                error: err.to_string(),
            }),
        }

        report.map(|r| r.outcome)
    }

    /// Download a batch of episodes, isolating failures per episode.
    ///
    /// Every identifier gets an attempt; an error on one episode (including
    /// transport errors) is recorded and the batch moves on. Once `cancel`
    /// fires, remaining episodes are recorded as cancelled without touching
    /// the network.
    pub async fn download_episodes(
        &self,
        ids: &[EpisodeRef],
        provider: &dyn ContentProvider,
        cancel: &CancellationToken,
    ) -> Vec<(EpisodeRef, Result<DownloadOutcome>)> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            if cancel.is_cancelled() {
                let outcome = DownloadOutcome::Skipped {
                    reason: SkipReason::Cancelled,
                };
                self.emit(Event::Skipped {
                    id: id.clone(),
                    reason: SkipReason::Cancelled,
                });
                results.push((id.clone(), Ok(outcome)));
                continue;
            }
            let result = self.download_episode(id, provider, cancel).await;
            if let Err(err) = &result {
                tracing::error!(%id, error = %err, "episode attempt aborted, continuing batch");
            }
            results.push((id.clone(), result));
        }
        results
    }

    /// Stream an arbitrary audio URL straight to `dest`
    pub async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        fetch::fetch_to_file(&self.http, url, dest, self.progress.as_ref()).await
    }
}

impl std::fmt::Debug for PodcastDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PodcastDownloader")
            .field("config", &self.config)
            .finish()
    }
}
