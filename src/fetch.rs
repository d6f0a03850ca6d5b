//! Direct URL fetching — streaming download of an arbitrary audio URL
//!
//! Covers feeds that expose a plain HTTPS URL instead of a catalog content
//! stream. The body is streamed to disk chunk by chunk; it is never
//! buffered in memory.

use crate::error::{Error, Result};
use crate::progress::{ProgressGuard, ProgressReporter};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Stream the body of `url` into `dest`.
///
/// A non-2xx response yields [`Error::Status`] with the code and URL
/// attached, and nothing is written. The destination's parent directories
/// are created as needed. When the server declares no content length,
/// progress is reported without a total.
pub async fn fetch_to_file(
    http: &reqwest::Client,
    url: &str,
    dest: &Path,
    progress: &dyn ProgressReporter,
) -> Result<PathBuf> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            code: status.as_u16(),
            url: url.to_string(),
        });
    }

    let total = response.content_length();
    tracing::info!(url, dest = %dest.display(), total_bytes = total, "fetching direct URL");

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(dest).await?;
    let guard = ProgressGuard::begin(progress, &dest.display().to_string(), total);

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        guard.advance(chunk.len() as u64);
    }
    file.flush().await?;

    Ok(dest.to_path_buf())
}
