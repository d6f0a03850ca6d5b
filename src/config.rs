//! Configuration types for podcast-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Target audio format for downloaded episodes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG Layer III (default)
    #[default]
    Mp3,
    /// Ogg Vorbis
    Ogg,
    /// MPEG-4 Audio
    M4a,
    /// Free Lossless Audio Codec
    Flac,
}

impl AudioFormat {
    /// File extension for this format, without the leading dot
    pub fn ext(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::M4a => "m4a",
            AudioFormat::Flac => "flac",
        }
    }
}

/// Main configuration for [`PodcastDownloader`](crate::PodcastDownloader)
///
/// All fields have sensible defaults; `Config::default()` works out of the
/// box. The output template recognizes the placeholders `{podcast}`,
/// `{episode_name}`, `{release_date}`, and `{ext}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Target audio format (determines the `{ext}` placeholder and whether
    /// conversion runs after download)
    #[serde(default)]
    pub audio_format: AudioFormat,

    /// Per-episode output path template, relative to `root_dir`
    /// (default: `"{podcast}/{episode_name} - {release_date}.{ext}"`)
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Root storage directory for downloaded episodes (default: "./podcasts")
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Skip downloads whose target file already exists with the expected size
    /// (default: true)
    #[serde(default = "default_true")]
    pub skip_existing: bool,

    /// Chunk size in bytes for content-stream reads (default: 50 KiB)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Throttle downloads to the episode's real playback duration
    /// (default: false)
    ///
    /// When enabled and the episode reports a non-zero `duration_ms`, the
    /// engine sleeps between chunks so the transfer never outruns real-time
    /// playback. It never slows a transfer below what the network delivers.
    #[serde(default)]
    pub real_time_download: bool,

    /// Timeout for individual catalog requests (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_format: AudioFormat::default(),
            output_template: default_output_template(),
            root_dir: default_root_dir(),
            skip_existing: true,
            chunk_size: default_chunk_size(),
            real_time_download: false,
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config {
                message: "chunk_size must be greater than zero".to_string(),
                key: Some("chunk_size".to_string()),
            });
        }
        if self.output_template.trim().is_empty() {
            return Err(Error::Config {
                message: "output_template must not be empty".to_string(),
                key: Some("output_template".to_string()),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config {
                message: "request_timeout must be greater than zero".to_string(),
                key: Some("request_timeout".to_string()),
            });
        }
        Ok(())
    }
}

fn default_output_template() -> String {
    "{podcast}/{episode_name} - {release_date}.{ext}".to_string()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./podcasts")
}

fn default_true() -> bool {
    true
}

fn default_chunk_size() -> usize {
    50 * 1024
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Serialize Duration as seconds for human-readable config files
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.chunk_size, 50 * 1024);
        assert!(config.skip_existing);
        assert!(!config.real_time_download);
        assert_eq!(config.audio_format, AudioFormat::Mp3);
    }

    #[test]
    fn zero_chunk_size_fails_validation() {
        let config = Config {
            chunk_size: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("chunk_size")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_template_fails_validation() {
        let config = Config {
            output_template: "  ".to_string(),
            ..Default::default()
        };
        match config.validate() {
            Err(Error::Config { key, .. }) => {
                assert_eq!(key.as_deref(), Some("output_template"))
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn audio_format_extensions() {
        assert_eq!(AudioFormat::Mp3.ext(), "mp3");
        assert_eq!(AudioFormat::Ogg.ext(), "ogg");
        assert_eq!(AudioFormat::M4a.ext(), "m4a");
        assert_eq!(AudioFormat::Flac.ext(), "flac");
    }

    #[test]
    fn config_deserializes_from_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"chunk_size": 8192, "real_time_download": true}"#).unwrap();
        assert_eq!(config.chunk_size, 8192);
        assert!(config.real_time_download);
        // Unspecified fields fall back to defaults
        assert_eq!(config.root_dir, PathBuf::from("./podcasts"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn request_timeout_serializes_as_seconds() {
        let config = Config {
            request_timeout: Duration::from_secs(15),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["request_timeout"], 15);
    }
}
