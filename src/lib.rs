//! # podcast-dl
//!
//! Async library for downloading podcast episodes from a remote catalog.
//!
//! The crate enumerates a show's episodes through the catalog's paginated
//! API, resolves per-episode metadata, and streams audio content to disk in
//! chunks, with optional real-time pacing that holds the transfer to the
//! episode's playback speed. Completed files are handed to a pluggable
//! audio converter (ffmpeg out of the box).
//!
//! ## Quick start
//!
//! ```no_run
//! use podcast_dl::{Config, PodcastDownloader};
//!
//! #[tokio::main]
//! async fn main() -> podcast_dl::Result<()> {
//!     let downloader =
//!         PodcastDownloader::connect("https://api.example.com/v1/", Config::default())?;
//!
//!     let episodes = downloader.list_episodes("4rOoJ6Egrf8K2IrywzwOMk").await?;
//!     println!("found {} episodes", episodes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Injected collaborators**: catalog access ([`CatalogClient`]), content
//!   streams ([`ContentProvider`]), conversion ([`AudioConverter`]), and
//!   progress ([`ProgressReporter`]) are traits, so tests run against fakes
//!   and callers can swap transports.
//! - **Per-episode isolation**: catalog-level failures become
//!   [`DownloadOutcome`] values instead of errors, so one bad episode never
//!   sinks a batch.
//! - **Cooperative cancellation**: downloads observe a
//!   [`CancellationToken`](tokio_util::sync::CancellationToken) between
//!   chunks and leave partial files in place for later resumption.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

pub mod catalog;
pub mod config;
pub mod convert;
pub mod downloader;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod lister;
pub mod metadata;
pub mod pacer;
pub mod paths;
pub mod progress;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use catalog::{CatalogClient, HttpCatalogClient};
pub use config::{AudioFormat, Config};
pub use convert::{AudioConverter, CliConverter, NoOpConverter};
pub use downloader::PodcastDownloader;
pub use engine::{ContentProvider, ContentStream, DownloadReport};
pub use error::{Error, Result};
pub use metadata::EpisodeMetadata;
pub use progress::{NoopProgress, ProgressReporter, TracingProgress};
pub use types::{DownloadOutcome, EpisodeRef, Event, SkipReason};
