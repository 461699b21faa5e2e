//! Transfer engine: streams one URL to one file and settles an outcome.
//!
//! The engine is the containment boundary of the crate: every failure path
//! of a transfer collapses into a [`DownloadOutcome::Failure`] value, and
//! nothing above [`TransferEngine::download_one`] ever receives an error for
//! an individual transfer.
//!
//! # Example
//!
//! ```no_run
//! use fetchkit::{DownloadRequest, TransferEngine};
//!
//! # async fn example() {
//! let mut engine = TransferEngine::new();
//! let request = DownloadRequest::new("https://example.com/data.bin")
//!     .with_directory("./downloads")
//!     .with_file_name("data.bin");
//! let outcome = engine.download_one(&request).await;
//! if let Some(path) = outcome.file_path() {
//!     println!("saved to {}", path.display());
//! }
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::naming::{self, NamingStrategy};
use crate::progress::{NullRender, ProgressRender, ProgressTracker};
use crate::storage;

use super::constants::DEFAULT_TIMEOUT_MILLIS;
use super::error::{FetchFault, StreamFault, TransferError};
use super::outcome::DownloadOutcome;
use super::request::DownloadRequest;

/// Value form of the engine options, deserializable from host configuration.
///
/// Every field carries its own default so partial configs fill in the rest:
/// 5000 ms stream-open timeout and the `Timestamp` naming strategy. The
/// progress renderer is a capability, not a value, and is injected through
/// [`EngineBuilder::render`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout for obtaining the HTTP response, in milliseconds.
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
    /// Strategy applied when a destination name collides.
    #[serde(default)]
    pub naming_strategy: NamingStrategy,
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
            naming_strategy: NamingStrategy::default(),
        }
    }
}

/// Builder for [`TransferEngine`].
pub struct EngineBuilder {
    config: EngineConfig,
    render: Box<dyn ProgressRender>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Starts from the defaults: 5000 ms timeout, `Timestamp` strategy,
    /// silent renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            render: Box::new(NullRender),
        }
    }

    /// Replaces the non-capability options wholesale.
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the stream-open timeout in milliseconds.
    #[must_use]
    pub fn timeout_millis(mut self, millis: u64) -> Self {
        self.config.timeout_millis = millis;
        self
    }

    /// Sets the default naming strategy for collision resolution.
    #[must_use]
    pub fn naming_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.config.naming_strategy = strategy;
        self
    }

    /// Injects the progress render surface.
    #[must_use]
    pub fn render(mut self, render: Box<dyn ProgressRender>) -> Self {
        self.render = render;
        self
    }

    /// Builds the engine, constructing the shared HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn build(self) -> TransferEngine {
        let timeout = Duration::from_millis(self.config.timeout_millis);
        let client = Client::builder()
            .connect_timeout(timeout)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");

        debug!(
            timeout_ms = self.config.timeout_millis,
            strategy = ?self.config.naming_strategy,
            "creating transfer engine"
        );

        TransferEngine {
            client,
            timeout,
            naming_strategy: self.config.naming_strategy,
            render: self.render,
        }
    }
}

/// Streams files from URLs to local storage, one transfer at a time.
///
/// The engine is created once and reused: the HTTP client pools connections
/// across transfers. Methods take `&mut self` because transfers are strictly
/// sequential; the renderer is exclusively owned and fed by one tracker at a
/// time.
pub struct TransferEngine {
    client: Client,
    timeout: Duration,
    naming_strategy: NamingStrategy,
    render: Box<dyn ProgressRender>,
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Returns a builder for custom configuration.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Creates an engine from a configuration value, with the silent
    /// renderer.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        EngineBuilder::new().config(config).build()
    }

    /// Returns the configured stream-open timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the configured default naming strategy.
    #[must_use]
    pub fn naming_strategy(&self) -> NamingStrategy {
        self.naming_strategy
    }

    /// Downloads one URL to local storage and settles an outcome.
    ///
    /// Never returns an error: network failures, filesystem failures, and
    /// mid-stream faults all resolve into [`DownloadOutcome::Failure`] with
    /// the failure classified for programmatic handling.
    #[instrument(skip(self, request), fields(url = %request.url, seq = request.sequence_number))]
    pub async fn download_one(&mut self, request: &DownloadRequest) -> DownloadOutcome {
        debug!("starting transfer");
        match self.run_transfer(request).await {
            Ok(file_path) => {
                info!(path = %file_path.display(), "transfer complete");
                DownloadOutcome::Success { file_path }
            }
            Err(error) => {
                warn!(error = %error, code = error.code(), "transfer failed");
                DownloadOutcome::Failure(error)
            }
        }
    }

    /// Runs the transfer steps in order; any error here becomes the outcome.
    async fn run_transfer(&mut self, request: &DownloadRequest) -> Result<PathBuf, TransferError> {
        // Fetch first: a fetch failure must leave no directory or progress
        // side effects behind.
        let response = self.open_stream(&request.url).await?;

        storage::ensure_directory(&request.directory).await?;

        let strategy = request.naming_strategy.unwrap_or(self.naming_strategy);
        let final_name =
            naming::resolve(Path::new(&request.directory), &request.file_name, strategy);
        let file_path = storage::destination_path(&request.directory, &final_name);

        let declared_total = response.content_length().unwrap_or(0);
        debug!(path = %file_path.display(), declared_total, "destination resolved");

        let mut tracker = ProgressTracker::new(self.render.as_mut());
        tracker
            .start(declared_total, request.sequence_number)
            .map_err(|e| TransferError::other(e.to_string()))?;

        let streamed = stream_to_sink(response, &request.url, &file_path, &mut tracker).await;
        tracker.stop();

        match streamed {
            Ok(()) => Ok(file_path),
            Err(error) => {
                // Do not leave partial data behind after a mid-stream fault.
                if matches!(error, TransferError::DownloadFailed { .. }) {
                    debug!(path = %file_path.display(), "removing partial file");
                    let _ = tokio::fs::remove_file(&file_path).await;
                }
                Err(error)
            }
        }
    }

    /// Opens the HTTP GET stream, applying the stream-open timeout.
    ///
    /// The timeout covers obtaining the response only; once streaming begins
    /// no deadline applies.
    async fn open_stream(&self, url: &str) -> Result<reqwest::Response, TransferError> {
        Url::parse(url).map_err(|e| TransferError::fetch(url, FetchFault::InvalidUrl(e)))?;

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| TransferError::fetch(url, FetchFault::TimedOut(self.timeout)))?
            .map_err(|e| TransferError::fetch(url, FetchFault::Transport(e)))?;

        // Non-2xx handling stays with the HTTP client.
        response
            .error_for_status()
            .map_err(|e| TransferError::fetch(url, FetchFault::Transport(e)))
    }
}

/// Drives the response stream into the sink chunk by chunk.
///
/// Sink creation failures keep the `FileSystem` classification; anything
/// after that is a `DownloadFailed` with the faulting side attached. The
/// payload is never materialized in memory.
async fn stream_to_sink(
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    tracker: &mut ProgressTracker<'_>,
) -> Result<(), TransferError> {
    let mut sink = storage::open_sink(file_path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result
            .map_err(|e| TransferError::download_failed(url, file_path, StreamFault::Read(e)))?;
        tracker.update(chunk.len() as u64);
        sink.write_all(&chunk)
            .await
            .map_err(|e| TransferError::download_failed(url, file_path, StreamFault::Write(e)))?;
    }

    sink.flush()
        .await
        .map_err(|e| TransferError::download_failed(url, file_path, StreamFault::Write(e)))?;

    Ok(())
}
