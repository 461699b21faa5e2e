//! Constants for the transfer module (timeouts, request defaults).

/// Default stream-open timeout (5 seconds).
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 5000;

/// Default destination file name when a request does not set one.
pub const DEFAULT_FILE_NAME: &str = "file";

/// Default 1-based sequence number for standalone transfers.
pub const DEFAULT_SEQUENCE_NUMBER: usize = 1;
