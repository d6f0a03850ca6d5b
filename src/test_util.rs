//! Shared fakes for unit tests

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::catalog::CatalogClient;
use crate::convert::AudioConverter;
use crate::engine::{ContentProvider, ContentStream};
use crate::error::{Error, Result};
use crate::types::EpisodeRef;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Canned catalog responses plus a request log
#[derive(Default)]
pub(crate) struct FakeCatalogClient {
    pages: Mutex<Vec<Value>>,
    resources: HashMap<String, Value>,
    pub(crate) page_requests: Mutex<Vec<(String, u64, u64)>>,
}

impl FakeCatalogClient {
    pub(crate) fn with_pages(pages: Vec<Value>) -> Self {
        Self {
            pages: Mutex::new(pages),
            ..Default::default()
        }
    }

    pub(crate) fn with_resource(path: impl Into<String>, body: Value) -> Self {
        let mut resources = HashMap::new();
        resources.insert(path.into(), body);
        Self {
            resources,
            ..Default::default()
        }
    }

    pub(crate) fn add_resource(mut self, path: impl Into<String>, body: Value) -> Self {
        self.resources.insert(path.into(), body);
        self
    }
}

#[async_trait]
impl CatalogClient for FakeCatalogClient {
    async fn fetch_page(&self, path: &str, offset: u64, limit: u64) -> Result<Value> {
        self.page_requests
            .lock()
            .unwrap()
            .push((path.to_string(), offset, limit));
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok(serde_json::json!({ "items": [] }))
        } else {
            Ok(pages.remove(0))
        }
    }

    async fn fetch_resource(&self, path: &str) -> Result<Value> {
        match self.resources.get(path) {
            Some(body) => Ok(body.clone()),
            None => Err(Error::Other(format!("unexpected resource request: {path}"))),
        }
    }
}

/// Deterministic content stream yielding bytes in reads capped at the
/// requested chunk size, then zero-length reads forever.
pub(crate) struct FakeStream {
    total: u64,
    served: u64,
    /// Stop serving data after this many bytes, simulating a stream that
    /// ends before its declared size
    limit: u64,
    reads: Arc<AtomicUsize>,
}

#[async_trait]
impl ContentStream for FakeStream {
    fn total_size(&self) -> u64 {
        self.total
    }

    async fn read_chunk(&mut self, max: usize) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let remaining = self.limit.saturating_sub(self.served);
        let n = remaining.min(max as u64) as usize;
        self.served += n as u64;
        Ok(vec![0xAB; n])
    }
}

/// Hands out [`FakeStream`]s, counting opens and reads across all of them
#[derive(Default)]
pub(crate) struct FakeProvider {
    total: u64,
    limit: u64,
    pub(crate) opened: AtomicUsize,
    pub(crate) reads: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub(crate) fn new(total: u64) -> Self {
        Self {
            total,
            limit: total,
            ..Default::default()
        }
    }

    pub(crate) fn truncated(total: u64, truncate_at: u64) -> Self {
        Self {
            limit: truncate_at,
            ..Self::new(total)
        }
    }
}

#[async_trait]
impl ContentProvider for FakeProvider {
    async fn open(&self, _id: &EpisodeRef) -> Result<Box<dyn ContentStream>> {
        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(FakeStream {
            total: self.total,
            served: 0,
            limit: self.limit,
            reads: Arc::clone(&self.reads),
        }))
    }
}

/// An [`AudioConverter`] that only counts invocations
#[derive(Default)]
pub(crate) struct CountingConverter {
    pub(crate) calls: AtomicUsize,
}

#[async_trait]
impl AudioConverter for CountingConverter {
    async fn convert(&self, _path: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Minimal valid episode resource body for the given names
pub(crate) fn episode_body(show: &str, episode: &str, date: &str, duration_ms: u64) -> Value {
    serde_json::json!({
        "name": episode,
        "release_date": date,
        "duration_ms": duration_ms,
        "show": { "name": show },
    })
}
