//! Terminal outcome of a transfer, consumed instead of an exception.

use std::path::{Path, PathBuf};

use super::error::TransferError;

/// The settled result of one transfer.
///
/// Exactly one variant is ever produced per request; the engine guarantees
/// every failure path collapses into `Failure` rather than propagating.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The transfer completed and the file was written.
    Success {
        /// Final on-disk path of the downloaded file.
        file_path: PathBuf,
    },
    /// The transfer failed; the error carries the classification and context.
    Failure(TransferError),
}

impl DownloadOutcome {
    /// Whether the transfer succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The written file path, when successful.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::Success { file_path } => Some(file_path),
            Self::Failure(_) => None,
        }
    }

    /// The failure, when the transfer did not succeed.
    #[must_use]
    pub fn error(&self) -> Option<&TransferError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Converts the outcome into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the carried [`TransferError`] for failure outcomes.
    pub fn into_result(self) -> Result<PathBuf, TransferError> {
        match self {
            Self::Success { file_path } => Ok(file_path),
            Self::Failure(error) => Err(error),
        }
    }
}
