//! Transfer request description.

use crate::naming::NamingStrategy;

use super::constants::{DEFAULT_FILE_NAME, DEFAULT_SEQUENCE_NUMBER};

/// One URL-to-file transfer attempt.
///
/// Every recognized option is enumerated with a defined default: empty
/// directory (current working directory), file name `"file"`, sequence
/// number 1, and no strategy override (the engine's configured strategy
/// applies). The engine takes requests by shared reference and never
/// mutates them.
///
/// # Example
///
/// ```
/// use fetchkit::{DownloadRequest, NamingStrategy};
///
/// let request = DownloadRequest::new("https://example.com/data.bin")
///     .with_directory("./out")
///     .with_file_name("data.bin")
///     .with_naming_strategy(NamingStrategy::Counter);
/// assert_eq!(request.sequence_number, 1);
/// ```
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Source URL to fetch.
    pub url: String,
    /// Destination directory; empty means the current working directory.
    pub directory: String,
    /// Desired destination file name, before collision resolution.
    pub file_name: String,
    /// 1-based index shown by the progress renderer.
    pub sequence_number: usize,
    /// Per-request strategy override; `None` inherits the engine's.
    pub naming_strategy: Option<NamingStrategy>,
}

impl DownloadRequest {
    /// Creates a request for `url` with all other options at their defaults.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            directory: String::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            naming_strategy: None,
        }
    }

    /// Sets the destination directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Sets the desired file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Sets the 1-based display sequence number.
    #[must_use]
    pub fn with_sequence_number(mut self, sequence_number: usize) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Overrides the engine's naming strategy for this request.
    #[must_use]
    pub fn with_naming_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.naming_strategy = Some(strategy);
        self
    }
}
