//! Progress reporting hooks for downloads
//!
//! The engine reports byte-level progress through [`ProgressReporter`], a
//! sync trait so implementations can back onto terminal progress bars, GUI
//! channels, or plain logs without touching the async engine internals.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receives progress callbacks while a download is in flight.
///
/// `begin` is called once before the first read, `advance` after every chunk
/// written, and `finish` exactly once when the attempt ends, on every exit
/// path including cancellation and errors.
pub trait ProgressReporter: Send + Sync {
    /// A download is starting. `total` is the expected byte count, or `None`
    /// when the server did not declare one.
    fn begin(&self, label: &str, total: Option<u64>);

    /// `bytes` more bytes were written to the output file
    fn advance(&self, bytes: u64);

    /// The download attempt ended
    fn finish(&self);
}

/// A [`ProgressReporter`] that does nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn begin(&self, _label: &str, _total: Option<u64>) {}
    fn advance(&self, _bytes: u64) {}
    fn finish(&self) {}
}

/// A [`ProgressReporter`] that logs through `tracing`.
///
/// Emits an info event at start and end, and debug events per chunk. Useful
/// as a default when no richer UI is attached.
#[derive(Debug, Default)]
pub struct TracingProgress {
    downloaded: AtomicU64,
}

impl TracingProgress {
    /// Create a new tracing-backed reporter
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for TracingProgress {
    fn begin(&self, label: &str, total: Option<u64>) {
        self.downloaded.store(0, Ordering::Relaxed);
        match total {
            Some(total) => tracing::info!(label, total_bytes = total, "download started"),
            None => tracing::info!(label, "download started (unknown size)"),
        }
    }

    fn advance(&self, bytes: u64) {
        let downloaded = self.downloaded.fetch_add(bytes, Ordering::Relaxed) + bytes;
        tracing::debug!(downloaded, "progress");
    }

    fn finish(&self) {
        let downloaded = self.downloaded.load(Ordering::Relaxed);
        tracing::info!(downloaded, "download finished");
    }
}

/// Calls [`ProgressReporter::finish`] when dropped, so every exit path out
/// of the engine releases the reporter exactly once.
pub(crate) struct ProgressGuard<'a> {
    reporter: &'a dyn ProgressReporter,
}

impl<'a> ProgressGuard<'a> {
    pub(crate) fn begin(
        reporter: &'a dyn ProgressReporter,
        label: &str,
        total: Option<u64>,
    ) -> Self {
        reporter.begin(label, total);
        Self { reporter }
    }

    pub(crate) fn advance(&self, bytes: u64) {
        self.reporter.advance(bytes);
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.reporter.finish();
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_progress_accumulates_bytes() {
        let progress = TracingProgress::new();
        progress.begin("ep.mp3", Some(100));
        progress.advance(40);
        progress.advance(60);
        assert_eq!(progress.downloaded.load(Ordering::Relaxed), 100);
        progress.finish();
    }

    #[test]
    fn guard_finishes_on_drop() {
        use std::sync::atomic::AtomicBool;

        #[derive(Default)]
        struct Finished(AtomicBool);
        impl ProgressReporter for Finished {
            fn begin(&self, _: &str, _: Option<u64>) {}
            fn advance(&self, _: u64) {}
            fn finish(&self) {
                self.0.store(true, Ordering::Relaxed);
            }
        }

        let reporter = Finished::default();
        {
            let _guard = ProgressGuard::begin(&reporter, "x", None);
        }
        assert!(reporter.0.load(Ordering::Relaxed), "drop must call finish");
    }
}
