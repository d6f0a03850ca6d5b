//! Real-time download pacing
//!
//! When enabled, throttles a transfer so it never runs ahead of the
//! episode's playback position: after `downloaded` of `total_bytes` bytes,
//! at least `(downloaded / total_bytes) * duration` wall-clock time must
//! have elapsed. The pacer only ever sleeps; it cannot speed up a slow link.

use std::time::Duration;
use tokio::time::Instant;

/// Paces chunk writes against the episode's playback duration.
///
/// Disabled pacers (flag off, zero duration, or zero size) are free: every
/// call to [`pace`](Self::pace) returns immediately.
pub struct RealTimePacer {
    enabled: bool,
    duration_ms: u64,
    total_bytes: u64,
    started: Instant,
}

impl RealTimePacer {
    /// Create a pacer for one transfer. The clock starts now.
    pub fn new(enabled: bool, duration_ms: u64, total_bytes: u64) -> Self {
        Self {
            enabled: enabled && duration_ms > 0 && total_bytes > 0,
            duration_ms,
            total_bytes,
            started: Instant::now(),
        }
    }

    /// Whether this pacer will ever sleep
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sleep until the wall clock catches up with the playback position
    /// implied by `downloaded` bytes. No-op when ahead of schedule is
    /// impossible (pacer disabled) or the transfer is behind schedule.
    pub async fn pace(&self, downloaded: u64) {
        if !self.enabled {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let want = (downloaded as f64 / self.total_bytes as f64) * (self.duration_ms as f64 / 1000.0);
        if want > elapsed {
            tokio::time::sleep(Duration::from_secs_f64(want - elapsed)).await;
        }
    }
}

impl std::fmt::Debug for RealTimePacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealTimePacer")
            .field("enabled", &self.enabled)
            .field("duration_ms", &self.duration_ms)
            .field("total_bytes", &self.total_bytes)
            .finish()
    }
}
