//! Core types for podcast-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Opaque catalog identifier for one episode
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeRef(pub String);

impl EpisodeRef {
    /// Create a new EpisodeRef
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EpisodeRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EpisodeRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for EpisodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reason a download attempt was skipped without writing any bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The catalog returned no data for the episode id
    EpisodeNotFound,
    /// A complete file of the expected size already exists at the target path
    AlreadyExists,
    /// The caller cancelled the download; any partial file is left in place
    Cancelled,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkipReason::EpisodeNotFound => "episode not found",
            SkipReason::AlreadyExists => "already exists",
            SkipReason::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Terminal result of one episode download attempt
///
/// Exactly one of these is produced per invocation of the download engine.
/// Transport errors do not produce an outcome — they propagate as
/// [`Error::Transport`](crate::Error::Transport) instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// The attempt ended without reading the content stream
    Skipped {
        /// Why the download was skipped
        reason: SkipReason,
    },
    /// The stream was drained and the file handed to conversion
    Completed {
        /// Total bytes written to the output file
        bytes_written: u64,
    },
    /// The catalog returned a structured error for this episode
    Failed {
        /// Human-readable description of the failure
        error: String,
    },
}

/// Event emitted during the download lifecycle
///
/// Consumers subscribe via
/// [`PodcastDownloader::subscribe`](crate::PodcastDownloader::subscribe);
/// events mirror the per-episode outcomes plus listing activity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A show's episode list was fully enumerated
    Listed {
        /// The show identifier that was listed
        show_id: String,
        /// Number of episodes found
        count: usize,
    },

    /// An episode download was skipped
    Skipped {
        /// Episode identifier
        id: EpisodeRef,
        /// Why it was skipped
        reason: SkipReason,
    },

    /// An episode download completed and conversion finished
    Completed {
        /// Episode identifier
        id: EpisodeRef,
        /// Total bytes written
        bytes_written: u64,
        /// Final output path
        path: PathBuf,
    },

    /// An episode download failed with a catalog error
    Failed {
        /// Episode identifier
        id: EpisodeRef,
        /// Failure description
        error: String,
    },
}
