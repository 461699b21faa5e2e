//! Fetchkit: embeddable HTTP download engine.
//!
//! Fetchkit streams files from URLs to local storage for host tools (CLIs,
//! batch jobs) that want download mechanics without owning them: live
//! progress (bytes, speed, ETA) through a pluggable render surface,
//! deterministic filename-collision resolution, and failures delivered as
//! classified outcome values instead of errors.
//!
//! # Architecture
//!
//! - [`transfer`] - the streaming engine, its configuration and contract types
//! - [`batch`] - sequential orchestration of multiple transfers
//! - [`naming`] - collision-safe destination naming strategies
//! - [`storage`] - destination directories, paths, and writable sinks
//! - [`progress`] - per-transfer progress tracking and render surfaces
//!
//! # Example
//!
//! ```no_run
//! use fetchkit::{BatchRequest, TransferEngine};
//!
//! # async fn example() {
//! let mut engine = TransferEngine::new();
//! let requests = vec![
//!     BatchRequest::new("https://example.com/a.pdf", "./downloads", "a.pdf"),
//!     BatchRequest::new("https://example.com/b.pdf", "./downloads", "b.pdf"),
//! ];
//! for outcome in engine.download_many(&requests).await {
//!     match outcome.into_result() {
//!         Ok(path) => println!("saved {}", path.display()),
//!         Err(error) => eprintln!("failed ({}): {error}", error.code()),
//!     }
//! }
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod naming;
pub mod progress;
pub mod storage;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use batch::BatchRequest;
pub use naming::NamingStrategy;
pub use progress::{
    IndicatifRender, NullRender, ProgressRender, ProgressSnapshot, ProgressTracker, RenderError,
    TrackerBusy,
};
pub use transfer::{
    DEFAULT_TIMEOUT_MILLIS, DownloadOutcome, DownloadRequest, EngineBuilder, EngineConfig,
    ErrorKind, FetchFault, StreamFault, TransferEngine, TransferError,
};
