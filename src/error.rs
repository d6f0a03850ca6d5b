//! Error types for podcast-dl
//!
//! This module provides the error taxonomy for the library:
//! - Transport failures (network-level, abort the current attempt)
//! - Catalog-level signals (`NotFound`, `ErrorResponse`) recovered per episode
//! - Direct-fetch HTTP status errors with the numeric code attached
//! - Local failures (I/O, configuration, conversion)

use thiserror::Error;

/// Result type alias for podcast-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for podcast-dl
///
/// Transport errors abort the current episode attempt and propagate to the
/// caller. `NotFound` and `ErrorResponse` are catalog-level signals that the
/// download engine recovers into a [`DownloadOutcome`](crate::DownloadOutcome)
/// instead of failing a whole batch.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "chunk_size")
        key: Option<String>,
    },

    /// Network/transport failure on a catalog request or content stream
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Catalog returned no data for the requested episode id
    #[error("episode not found: {0}")]
    NotFound(String),

    /// Catalog returned a structured error payload
    #[error("catalog error response: {message}")]
    ErrorResponse {
        /// The error message extracted from the catalog response body
        message: String,
    },

    /// Direct URL fetch returned a non-2xx HTTP status
    #[error("request to {url} returned status code {code}")]
    Status {
        /// The HTTP status code returned by the server
        code: u16,
        /// The URL that was requested
        url: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode/encode error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Audio conversion failed (external tool error)
    #[error("audio conversion failed: {0}")]
    Conversion(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True if this error isolates to a single episode (the caller should
    /// continue with the next one) rather than indicating a broken session.
    pub fn is_per_episode(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::ErrorResponse { .. } | Error::Status { .. }
        )
    }
}
