//! Error types for transfer operations.
//!
//! All failure paths of a transfer collapse into the single tagged
//! [`TransferError`] enum so callers can branch on [`TransferError::kind`]
//! (or pattern match) instead of parsing message text.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Coarse failure classification carried by every [`TransferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP GET could not be initiated or no response was obtained.
    Fetch,
    /// Directory creation or sink creation failed.
    FileSystem,
    /// The stream or the sink failed after the transfer began.
    DownloadFailed,
    /// Anything else surfacing at the engine boundary.
    Other,
}

/// Why the HTTP GET failed before any byte was streamed.
#[derive(Debug, Error)]
pub enum FetchFault {
    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure or error status from the server.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// No response arrived within the configured stream-open timeout.
    #[error("no response within {}ms", .0.as_millis())]
    TimedOut(Duration),
}

/// Which side of the chunk pipeline failed mid-transfer.
#[derive(Debug, Error)]
pub enum StreamFault {
    /// Reading the next chunk from the response stream failed.
    #[error("response stream read failed: {0}")]
    Read(#[from] reqwest::Error),

    /// Writing a chunk (or the final flush) to the destination sink failed.
    #[error("sink write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors produced by a single transfer.
///
/// Each variant carries the context needed to react programmatically: the
/// URL for fetch failures, the attempted path for filesystem failures, and
/// both for failures after streaming began.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The GET could not be initiated or the response could not be obtained
    /// (invalid URL, network failure, timeout, error status).
    #[error("could not fetch {url}: {source}")]
    Fetch {
        /// The URL that failed to fetch.
        url: String,
        /// The underlying cause.
        #[source]
        source: FetchFault,
    },

    /// Directory creation or sink creation failed.
    #[error("filesystem operation failed at {path}: {source}")]
    FileSystem {
        /// The path the operation was attempted on.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A stream-read or sink-write error after the transfer began.
    #[error("download of {url} to {path} failed: {source}")]
    DownloadFailed {
        /// The URL being downloaded.
        url: String,
        /// The destination path being written.
        path: PathBuf,
        /// The underlying cause.
        #[source]
        source: StreamFault,
    },

    /// Unclassified failure settling at the engine boundary.
    #[error("transfer failed: {message}")]
    Other {
        /// Description of what went wrong.
        message: String,
    },
}

impl TransferError {
    /// Creates a fetch error.
    pub fn fetch(url: impl Into<String>, source: impl Into<FetchFault>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Creates a filesystem error.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates a mid-transfer download error.
    pub fn download_failed(
        url: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl Into<StreamFault>,
    ) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates an unclassified error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Returns the failure classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::FileSystem { .. } => ErrorKind::FileSystem,
            Self::DownloadFailed { .. } => ErrorKind::DownloadFailed,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Returns a stable machine-readable code for the failure kind.
    ///
    /// Useful when outcomes are serialized into host tools that cannot carry
    /// the enum itself.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Fetch => "fetch_failed",
            ErrorKind::FileSystem => "filesystem_failed",
            ErrorKind::DownloadFailed => "download_failed",
            ErrorKind::Other => "unclassified",
        }
    }
}

// Note on From trait implementations:
// There are intentionally no blanket `From<reqwest::Error>` or
// `From<std::io::Error>` conversions into `TransferError`, because every
// variant requires context (url, path) the source errors do not carry. The
// helper constructors are the supported way to build these errors.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_includes_url_and_cause() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let error = TransferError::fetch("not a url", FetchFault::InvalidUrl(parse_err));
        let msg = error.to_string();
        assert!(msg.contains("could not fetch"), "got: {msg}");
        assert!(msg.contains("not a url"), "got: {msg}");
        assert_eq!(error.kind(), ErrorKind::Fetch);
        assert_eq!(error.code(), "fetch_failed");
    }

    #[test]
    fn test_fetch_timeout_display_includes_millis() {
        let error = TransferError::fetch(
            "https://example.com/slow",
            FetchFault::TimedOut(Duration::from_millis(5000)),
        );
        let msg = error.to_string();
        assert!(msg.contains("5000ms"), "got: {msg}");
    }

    #[test]
    fn test_file_system_error_carries_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = TransferError::file_system("/tmp/out", io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/out"), "got: {msg}");
        assert_eq!(error.kind(), ErrorKind::FileSystem);
        assert_eq!(error.code(), "filesystem_failed");
    }

    #[test]
    fn test_download_failed_carries_url_and_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full");
        let error = TransferError::download_failed(
            "https://example.com/file.bin",
            "/tmp/out/file.bin",
            StreamFault::Write(io_error),
        );
        let msg = error.to_string();
        assert!(msg.contains("https://example.com/file.bin"), "got: {msg}");
        assert!(msg.contains("/tmp/out/file.bin"), "got: {msg}");
        assert_eq!(error.kind(), ErrorKind::DownloadFailed);
        assert_eq!(error.code(), "download_failed");
    }

    #[test]
    fn test_other_error_kind_and_code() {
        let error = TransferError::other("tracker already active");
        assert_eq!(error.kind(), ErrorKind::Other);
        assert_eq!(error.code(), "unclassified");
        assert!(error.to_string().contains("tracker already active"));
    }

    #[test]
    fn test_source_chain_is_preserved() {
        use std::error::Error as _;

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let error = TransferError::file_system("/nope", io_error);
        let source = error.source().unwrap();
        assert!(source.to_string().contains("missing dir"));
    }
}
