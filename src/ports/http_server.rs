use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::ports::file_system::FileSystemError;

/// Error type for HTTP handler operations
///
/// Classification never produces one of these: a detected attack is a
/// rejected envelope, not an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HandlerError {
    /// A static resource the route depends on is missing
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl HandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FileSystemError> for HandlerError {
    fn from(err: FileSystemError) -> Self {
        match err {
            FileSystemError::NotFound(_) => {
                HandlerError::ResourceNotFound("HTML file not found".to_string())
            }
            other => HandlerError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match &self {
            HandlerError::ResourceNotFound(resource) => {
                tracing::warn!("Resource not found: {}", resource)
            }
            HandlerError::InternalError(e) => tracing::error!("Request handling error: {}", e),
        }
        (self.status_code(), self.to_string()).into_response()
    }
}
