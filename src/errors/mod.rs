use std::{fmt, io};
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    /// Storage failure that is not a missing record
    Io(io::Error),
    /// No record exists for a validated page name
    NotFound,
    /// Route or page name failed validation
    InvalidName,
    TemplateError(String),
    Config(String),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::NotFound => write!(f, "Not found"),
            WikiError::InvalidName => write!(f, "Invalid page name"),
            WikiError::TemplateError(e) => write!(f, "Template error: {}", e),
            WikiError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            // Malformed names are indistinguishable from unknown routes
            WikiError::NotFound | WikiError::InvalidName => {
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            WikiError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("I/O error: {}", e),
            )
                .into_response(),
            WikiError::TemplateError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response(),
            WikiError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", e),
            )
                .into_response(),
        }
    }
}
