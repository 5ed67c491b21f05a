//! Filesystem error types.

use std::path::PathBuf;

use thiserror::Error;

/// Output directory, log file and path derivation failures.
#[derive(Debug, Error)]
pub enum FsIoError {
    /// Input path has no usable file name to derive the output directory from.
    #[error("Input path has no file name: {}", .0.display())]
    InvalidInputPath(PathBuf),
    /// Output directory could not be created.
    #[error("Failed to create directory {}: {message}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// A file under the output directory could not be written.
    #[error("Failed to write {}: {message}", path.display())]
    WriteFile {
        /// File path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

/// Host file browser could not be launched. Logged, never propagated.
#[derive(Debug, Error)]
#[error("Failed to open folder {}: {message}", path.display())]
pub struct FolderOpenError {
    /// Folder that should have been opened.
    pub path: PathBuf,
    /// Underlying launcher error text.
    pub message: String,
}
