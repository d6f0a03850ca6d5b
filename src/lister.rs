//! Episode listing — paginated enumeration of a show's episodes

use crate::catalog::CatalogClient;
use crate::error::Result;
use crate::types::EpisodeRef;
use serde_json::Value;

/// Page size for episode listing requests
pub(crate) const PAGE_LIMIT: u64 = 50;

/// Read cursor over a paginated catalog collection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    /// Index of the first item on the next page
    pub offset: u64,
    /// Maximum items per page
    pub limit: u64,
}

impl PageCursor {
    /// Cursor at the start of the collection
    pub fn new(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// Advance past the page just fetched
    pub fn advance(&mut self) {
        self.offset += self.limit;
    }
}

/// Enumerate every episode identifier of a show, in catalog order.
///
/// Fetches pages of [`PAGE_LIMIT`] items until a page comes back with fewer
/// items than requested. Any transport error aborts the whole listing. A
/// page without an `items` array counts as empty and terminates.
pub async fn list_episodes(
    client: &dyn CatalogClient,
    show_id: &str,
) -> Result<Vec<EpisodeRef>> {
    let path = format!("shows/{show_id}/episodes");
    let mut episodes = Vec::new();
    let mut cursor = PageCursor::new(PAGE_LIMIT);

    loop {
        let page = client
            .fetch_page(&path, cursor.offset, cursor.limit)
            .await?;
        let items = page
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for item in items {
            if let Some(id) = item.get("id").and_then(Value::as_str) {
                episodes.push(EpisodeRef::from(id));
            }
        }

        tracing::debug!(show_id, offset = cursor.offset, page_len = items.len(), "listed page");
        let page_len = items.len() as u64;
        cursor.advance();
        if page_len < cursor.limit {
            break;
        }
    }

    tracing::info!(show_id, count = episodes.len(), "episode listing complete");
    Ok(episodes)
}
