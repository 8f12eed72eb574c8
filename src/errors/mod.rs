use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    /// Title has no readable backing file
    NotFound,
    /// Request path does not match `/(view|edit|save)/<title>`
    InvalidPath,
    /// Writing a page to the document root failed
    Write(io::Error),
    RenderError(String),
    Config(String),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl std::fmt::Display for WikiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::NotFound => write!(f, "not found"),
            WikiError::InvalidPath => write!(f, "invalid path"),
            WikiError::Write(e) => write!(f, "write error: {}", e),
            WikiError::RenderError(e) => write!(f, "{}", e),
            WikiError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            // Unmatched routes and missing pages look the same to the client.
            WikiError::NotFound | WikiError::InvalidPath => {
                (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
            }
            WikiError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("I/O error: {}", e),
            )
                .into_response(),
            WikiError::Write(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Write error: {}", e),
            )
                .into_response(),
            WikiError::RenderError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
            WikiError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Config error: {}", e),
            )
                .into_response(),
        }
    }
}
