//! Live progress tracking for one transfer.
//!
//! A [`ProgressTracker`] owns the byte counters for a single transfer and
//! pushes derived values (percent, speed, ETA) to a [`ProgressRender`]
//! surface. Render failures are cosmetic: they are swallowed and logged,
//! never allowed to abort the transfer feeding the tracker.

mod render;

pub use render::{IndicatifRender, NullRender, ProgressRender, RenderError};

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Derived progress values handed to the render surface on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// 1-based display index of the transfer within its batch.
    pub display_index: usize,
    /// Completion percentage, clamped to `0.0..=100.0`. Stays `0.0` when the
    /// total size is unknown.
    pub percent: f64,
    /// Megabytes received so far, two-decimal precision.
    pub transferred_mb: f64,
    /// Declared total in megabytes, two-decimal precision; `0.0` when the
    /// source did not declare a length.
    pub total_mb: f64,
    /// Instantaneous speed in MB/s, `0.0` until enough wall clock elapsed.
    pub speed_mbps: f64,
    /// Estimated time remaining; `None` when it cannot be derived yet
    /// (renderers show a sentinel instead).
    pub eta: Option<Duration>,
}

/// Error returned by [`ProgressTracker::start`] on re-entry.
///
/// A tracker is strictly sequential: `start` may not be called again without
/// an intervening [`ProgressTracker::stop`].
#[derive(Debug, Error)]
#[error("progress tracker already started")]
pub struct TrackerBusy;

/// Byte counters for one active transfer.
struct ProgressState {
    total_bytes: u64,
    received_bytes: u64,
    started_at: Instant,
    display_index: usize,
}

impl ProgressState {
    fn new(total_bytes: u64, display_index: usize) -> Self {
        Self {
            total_bytes,
            received_bytes: 0,
            started_at: Instant::now(),
            display_index,
        }
    }

    fn snapshot(&self) -> ProgressSnapshot {
        let total_mb = to_mb(self.total_bytes);
        let transferred_mb = to_mb(self.received_bytes);
        let elapsed_secs = self.started_at.elapsed().as_secs_f64();

        let percent = if total_mb > 0.0 {
            (transferred_mb / total_mb * 100.0).min(100.0)
        } else {
            0.0
        };

        let raw_speed = transferred_mb / elapsed_secs;
        let speed_mbps = if raw_speed.is_finite() { raw_speed } else { 0.0 };

        let eta = if total_mb > 0.0 && transferred_mb > 0.0 && elapsed_secs > 0.0 {
            let remaining_mb = (total_mb - transferred_mb).max(0.0);
            let eta_secs = remaining_mb * elapsed_secs / transferred_mb;
            eta_secs
                .is_finite()
                .then(|| Duration::from_secs_f64(eta_secs))
        } else {
            None
        };

        ProgressSnapshot {
            display_index: self.display_index,
            percent,
            transferred_mb,
            total_mb,
            speed_mbps,
            eta,
        }
    }
}

/// Tracks received bytes for one transfer and feeds the render surface.
///
/// Created fresh per transfer; the borrowed renderer outlives it and is
/// reused across transfers. Dropping the tracker without calling
/// [`stop`](Self::stop) leaves the renderer unstopped, so the engine always
/// stops it before settling an outcome.
pub struct ProgressTracker<'r> {
    render: &'r mut dyn ProgressRender,
    state: Option<ProgressState>,
}

impl<'r> ProgressTracker<'r> {
    /// Creates an inactive tracker around a render surface.
    pub fn new(render: &'r mut dyn ProgressRender) -> Self {
        Self {
            render,
            state: None,
        }
    }

    /// Activates the tracker with the declared total size (0 = unknown) and
    /// the transfer's display index.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerBusy`] when the tracker is already active.
    pub fn start(
        &mut self,
        declared_total_bytes: u64,
        display_index: usize,
    ) -> Result<(), TrackerBusy> {
        if self.state.is_some() {
            return Err(TrackerBusy);
        }
        let state = ProgressState::new(declared_total_bytes, display_index);
        let snapshot = state.snapshot();
        self.state = Some(state);
        if let Err(e) = self.render.start(&snapshot) {
            warn!(error = %e, "progress render start failed; continuing without it");
        }
        Ok(())
    }

    /// Records a received chunk and pushes a fresh snapshot to the renderer.
    ///
    /// A no-op when the tracker is inactive. Render failures are swallowed
    /// and logged; they never propagate to the transfer.
    pub fn update(&mut self, chunk_bytes: u64) {
        let Some(state) = self.state.as_mut() else {
            debug!(chunk_bytes, "progress update ignored; tracker not active");
            return;
        };
        state.received_bytes = state.received_bytes.saturating_add(chunk_bytes);
        let snapshot = state.snapshot();
        if let Err(e) = self.render.update(&snapshot) {
            warn!(error = %e, "progress render update failed; continuing without it");
        }
    }

    /// Deactivates the tracker. Idempotent: calling it while inactive is a
    /// no-op, and the active flag clears even if the renderer's stop errors.
    pub fn stop(&mut self) {
        if self.state.take().is_none() {
            return;
        }
        if let Err(e) = self.render.stop() {
            warn!(error = %e, "progress render stop failed");
        }
    }

    /// Whether a transfer is currently being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }
}

/// Converts bytes to megabytes with two-decimal precision.
fn to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
