use std::path::Path;

use tower_http::services::ServeDir;

use crate::ports::file_system::{FileSystem, FileSystemError, FileSystemResult};

/// File system adapter backed by `tokio::fs`
#[derive(Debug, Default, Clone)]
pub struct FileSystemAdapter;

impl FileSystemAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Service serving every other asset under `root`
    pub fn static_service(root: &str) -> ServeDir {
        ServeDir::new(root)
    }
}

impl FileSystem for FileSystemAdapter {
    async fn read_text(&self, path: &Path) -> FileSystemResult<String> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FileSystemError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(FileSystemError::IoError(e)),
        }
    }
}
