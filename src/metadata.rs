//! Episode metadata resolution
//!
//! Turns a raw catalog episode payload into the fields the download engine
//! needs, classifying empty and error payloads along the way.

use crate::catalog::{self, CatalogClient};
use crate::error::{Error, Result};
use crate::paths::sanitize_filename;
use crate::types::EpisodeRef;
use serde_json::Value;

/// Resolved metadata for one episode, with names already sanitized for use
/// as path components
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodeMetadata {
    /// Sanitized show name
    pub show_name: String,
    /// Sanitized episode title
    pub episode_name: String,
    /// Sanitized release date string
    pub release_date: String,
    /// Playback duration in milliseconds; zero when the payload omits it
    pub duration_ms: u64,
}

/// Fetch and classify one episode's metadata.
///
/// An empty or null payload means the id resolved to nothing and yields
/// [`Error::NotFound`]. The duration is extracted before the error-marker
/// check because error payloads may omit it entirely; the error marker still
/// wins, so a payload carrying both a duration and an error marker yields
/// [`Error::ErrorResponse`].
pub async fn resolve_episode(
    client: &dyn CatalogClient,
    id: &EpisodeRef,
) -> Result<EpisodeMetadata> {
    let info = client.fetch_resource(&format!("episodes/{id}")).await?;

    if is_empty_payload(&info) {
        tracing::warn!(%id, "catalog returned no data for episode");
        return Err(Error::NotFound(id.to_string()));
    }

    // Extracted before the marker check: error payloads may lack duration_ms
    let duration_ms = info.get("duration_ms").and_then(Value::as_u64).unwrap_or(0);

    if let Some(message) = catalog::error_message(&info) {
        tracing::warn!(%id, %message, "catalog returned an error payload for episode");
        return Err(Error::ErrorResponse { message });
    }

    let episode_name = required_str(&info, id, "name", &["name"])?;
    let release_date = required_str(&info, id, "release_date", &["release_date"])?;
    let show_name = required_str(&info, id, "show.name", &["show", "name"])?;

    Ok(EpisodeMetadata {
        show_name: sanitize_filename(&show_name),
        episode_name: sanitize_filename(&episode_name),
        release_date: sanitize_filename(&release_date),
        duration_ms,
    })
}

fn is_empty_payload(info: &Value) -> bool {
    match info {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn required_str(info: &Value, id: &EpisodeRef, label: &str, path: &[&str]) -> Result<String> {
    let mut node = info;
    for key in path {
        node = match node.get(key) {
            Some(next) => next,
            None => {
                return Err(Error::ErrorResponse {
                    message: format!("episode {id} payload is missing `{label}`"),
                });
            }
        };
    }
    match node.as_str() {
        Some(s) => Ok(s.to_string()),
        None => Err(Error::ErrorResponse {
            message: format!("episode {id} payload has a non-string `{label}`"),
        }),
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{FakeCatalogClient, episode_body};
    use serde_json::json;

    #[tokio::test]
    async fn resolves_and_sanitizes_fields() {
        let client = FakeCatalogClient::with_resource(
            "episodes/ep1",
            episode_body("Tech: Talk", "Pilot/Intro", "2021-03-14", 1_800_000),
        );

        let meta = resolve_episode(&client, &EpisodeRef::from("ep1"))
            .await
            .unwrap();

        assert_eq!(meta.show_name, "Tech_ Talk");
        assert_eq!(meta.episode_name, "Pilot_Intro");
        assert_eq!(meta.release_date, "2021-03-14");
        assert_eq!(meta.duration_ms, 1_800_000);
    }

    #[tokio::test]
    async fn empty_object_is_not_found() {
        let client = FakeCatalogClient::with_resource("episodes/gone", json!({}));

        match resolve_episode(&client, &EpisodeRef::from("gone")).await {
            Err(Error::NotFound(id)) => assert_eq!(id, "gone"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_payload_is_not_found() {
        let client = FakeCatalogClient::with_resource("episodes/gone", json!(null));

        assert!(matches!(
            resolve_episode(&client, &EpisodeRef::from("gone")).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn error_marker_wins_even_with_duration_present() {
        let client = FakeCatalogClient::with_resource(
            "episodes/bad",
            json!({
                "duration_ms": 123_000,
                "error": { "status": 401, "message": "token expired" },
            }),
        );

        match resolve_episode(&client, &EpisodeRef::from("bad")).await {
            Err(Error::ErrorResponse { message }) => assert_eq!(message, "token expired"),
            other => panic!("expected ErrorResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_payload_without_duration_is_classified() {
        // The marker check must not be preempted by a failed duration lookup
        let client = FakeCatalogClient::with_resource(
            "episodes/bad",
            json!({ "error": "invalid id" }),
        );

        assert!(matches!(
            resolve_episode(&client, &EpisodeRef::from("bad")).await,
            Err(Error::ErrorResponse { .. })
        ));
    }

    #[tokio::test]
    async fn missing_duration_defaults_to_zero() {
        let client = FakeCatalogClient::with_resource(
            "episodes/ep",
            json!({
                "name": "Ep",
                "release_date": "2020-01-01",
                "show": { "name": "Show" },
            }),
        );

        let meta = resolve_episode(&client, &EpisodeRef::from("ep"))
            .await
            .unwrap();
        assert_eq!(meta.duration_ms, 0);
    }

    #[tokio::test]
    async fn missing_show_name_is_an_error_response() {
        let client = FakeCatalogClient::with_resource(
            "episodes/ep",
            json!({ "name": "Ep", "release_date": "2020-01-01", "duration_ms": 1 }),
        );

        match resolve_episode(&client, &EpisodeRef::from("ep")).await {
            Err(Error::ErrorResponse { message }) => {
                assert!(message.contains("show.name"), "got: {message}")
            }
            other => panic!("expected ErrorResponse, got {other:?}"),
        }
    }
}
