//! Catalog client — paginated queries against the remote catalog API.
//!
//! The [`CatalogClient`] trait is the seam between the core and the catalog
//! service. Production code uses [`HttpCatalogClient`]; tests inject fakes.
//! Transport failures surface as [`Error::Transport`]; a successfully
//! transported response whose body carries an error marker is returned to the
//! caller as data — callers must check [`error_message`] before trusting
//! other fields.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Well-known error-marker field in catalog response bodies
pub(crate) const ERROR_KEY: &str = "error";

/// Abstraction over catalog API access, enabling testability.
///
/// Both methods perform one network round trip and return the decoded
/// response body. Semantic errors (error-marker field present) are data,
/// not `Err` — only transport-level failures produce an error.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of a paginated resource (e.g., `shows/{id}/episodes`)
    async fn fetch_page(&self, path: &str, offset: u64, limit: u64) -> Result<Value>;

    /// Fetch a single resource (e.g., `episodes/{id}`)
    async fn fetch_resource(&self, path: &str) -> Result<Value>;
}

/// Extract the error message from a catalog response body, if present.
///
/// The catalog signals semantic failures with a well-known `error` field
/// whose value is either an object with a `message` field or a bare string.
pub fn error_message(body: &Value) -> Option<String> {
    let marker = body.get(ERROR_KEY)?;
    if let Some(message) = marker.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(message) = marker.as_str() {
        return Some(message.to_string());
    }
    Some(marker.to_string())
}

/// Production [`CatalogClient`] over HTTP.
///
/// Holds a connection-pooling `reqwest` client and the catalog base URL.
/// Instances are cheap to clone and share.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for the given catalog base URL.
    ///
    /// The base URL should end with a trailing slash so resource paths join
    /// underneath it (one is appended if missing).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%url, "catalog request");
        let response = self.client.get(url).query(query).send().await?;
        // Do not raise on HTTP status here: the catalog reports semantic
        // failures (bad id, expired token) as JSON error payloads that the
        // caller inspects via the error marker.
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(&self, path: &str, offset: u64, limit: u64) -> Result<Value> {
        self.get_json(
            path,
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn fetch_resource(&self, path: &str) -> Result<Value> {
        self.get_json(path, &[]).await
    }
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
