//! Render surfaces consuming progress snapshots.
//!
//! The tracker pushes derived values through the [`ProgressRender`] trait;
//! the presentation is replaceable by the embedding tool. Two surfaces ship
//! with the crate: the silent [`NullRender`] default and the terminal
//! [`IndicatifRender`] bar.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::ProgressSnapshot;

/// Error raised by a render surface; always swallowed by the tracker.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Observation surface receiving progress for one transfer at a time.
///
/// `start` is called once per transfer, `update` per received chunk, and
/// `stop` when the transfer settles (success or failure). Implementations
/// may error freely: the tracker logs and discards every failure.
pub trait ProgressRender: Send {
    /// Called when a transfer begins, with the initial snapshot.
    fn start(&mut self, snapshot: &ProgressSnapshot) -> Result<(), RenderError>;

    /// Called after each received chunk.
    fn update(&mut self, snapshot: &ProgressSnapshot) -> Result<(), RenderError>;

    /// Called once the transfer settles.
    fn stop(&mut self) -> Result<(), RenderError>;
}

/// Silent render surface; the default for embedded use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRender;

impl ProgressRender for NullRender {
    fn start(&mut self, _snapshot: &ProgressSnapshot) -> Result<(), RenderError> {
        Ok(())
    }

    fn update(&mut self, _snapshot: &ProgressSnapshot) -> Result<(), RenderError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Terminal progress bar backed by `indicatif`.
///
/// One bar per transfer, prefixed with the transfer's display index. The bar
/// position is the completion percentage; the message carries MB counters,
/// speed, and the ETA (with a `--:--` sentinel while unknown).
#[derive(Debug, Default)]
pub struct IndicatifRender {
    bar: Option<ProgressBar>,
}

impl IndicatifRender {
    /// Creates a renderer with no active bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressRender for IndicatifRender {
    fn start(&mut self, snapshot: &ProgressSnapshot) -> Result<(), RenderError> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{prefix} {wide_bar} {percent}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        bar.set_prefix(format!("[{}]", snapshot.display_index));
        self.bar = Some(bar);
        Ok(())
    }

    fn update(&mut self, snapshot: &ProgressSnapshot) -> Result<(), RenderError> {
        if let Some(bar) = &self.bar {
            bar.set_position(snapshot.percent as u64);
            bar.set_message(format!(
                "{:.2}/{:.2} MB  {:.2} MB/s  ETA {}",
                snapshot.transferred_mb,
                snapshot.total_mb,
                snapshot.speed_mbps,
                format_eta(snapshot.eta)
            ));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RenderError> {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        Ok(())
    }
}

/// Formats an ETA as `MM:SS`, or the `--:--` sentinel when unknown.
fn format_eta(eta: Option<Duration>) -> String {
    match eta {
        Some(eta) => {
            let total_secs = eta.as_secs();
            format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
        }
        None => "--:--".to_string(),
    }
}
