//! Destination management: directories, paths, and writable sinks.
//!
//! Every IO failure here is wrapped into [`TransferError::FileSystem`] with
//! the attempted path, so the transfer engine never sees an unwrapped
//! low-level error.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::BufWriter;
use tracing::debug;

use crate::transfer::TransferError;

/// Ensures the destination directory exists, creating intermediate
/// directories as needed.
///
/// An empty path is a no-op success: the caller intends the current working
/// directory. Existing directories are accepted without side effects.
///
/// # Errors
///
/// Returns [`TransferError::FileSystem`] carrying the attempted path when
/// creation fails.
pub async fn ensure_directory(directory: &str) -> Result<(), TransferError> {
    if directory.is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| TransferError::file_system(directory, e))?;
    debug!(directory = %directory, "destination directory ready");
    Ok(())
}

/// Appends a trailing platform separator to a non-empty directory path.
///
/// An empty path stays empty; a path already ending in a separator is
/// returned unchanged.
#[must_use]
pub fn normalize_dir(directory: &str) -> String {
    if directory.is_empty() {
        return String::new();
    }
    match directory.chars().last() {
        Some(last) if std::path::is_separator(last) => directory.to_string(),
        _ => format!("{directory}{}", std::path::MAIN_SEPARATOR),
    }
}

/// Builds the full destination path: normalized directory + file name.
#[must_use]
pub fn destination_path(directory: &str, file_name: &str) -> PathBuf {
    PathBuf::from(format!("{}{file_name}", normalize_dir(directory)))
}

/// Opens a buffered writable sink at `path`, truncating any existing file.
///
/// # Errors
///
/// Returns [`TransferError::FileSystem`] carrying the attempted path when
/// the file cannot be created.
pub async fn open_sink(path: &Path) -> Result<BufWriter<File>, TransferError> {
    let file = File::create(path)
        .await
        .map_err(|e| TransferError::file_system(path, e))?;
    Ok(BufWriter::new(file))
}
