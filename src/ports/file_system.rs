use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for file system operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FileSystemError {
    /// The requested file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Error when encountering an IO issue
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for file system operations
pub type FileSystemResult<T> = Result<T, FileSystemError>;

/// FileSystem defines the port (interface) for reading static pages
pub trait FileSystem: Send + Sync + 'static {
    /// Read a UTF-8 text file
    ///
    /// # Arguments
    /// * `path` - Full path of the file
    ///
    /// # Returns
    /// A future that resolves to the file contents or an error
    fn read_text(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = FileSystemResult<String>> + Send;
}
