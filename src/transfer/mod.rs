//! Streaming transfer engine: one URL in, one settled outcome out.
//!
//! This module owns the download algorithm and its contract types. A
//! [`TransferEngine`] opens the HTTP stream, coordinates naming, storage and
//! progress, and resolves every transfer to a single [`DownloadOutcome`]:
//! success with the written path, or a classified [`TransferError`].
//!
//! # Example
//!
//! ```no_run
//! use fetchkit::{DownloadRequest, TransferEngine};
//!
//! # async fn example() {
//! let mut engine = TransferEngine::new();
//! let outcome = engine
//!     .download_one(&DownloadRequest::new("https://example.com/file.pdf"))
//!     .await;
//! match outcome.into_result() {
//!     Ok(path) => println!("saved {}", path.display()),
//!     Err(error) => eprintln!("{}: {error}", error.code()),
//! }
//! # }
//! ```

mod constants;
mod engine;
mod error;
mod outcome;
mod request;

pub use constants::{DEFAULT_FILE_NAME, DEFAULT_SEQUENCE_NUMBER, DEFAULT_TIMEOUT_MILLIS};
pub use engine::{EngineBuilder, EngineConfig, TransferEngine};
pub use error::{ErrorKind, FetchFault, StreamFault, TransferError};
pub use outcome::DownloadOutcome;
pub use request::DownloadRequest;
