//! Error types for the Folio client

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Build the error matching a non-success HTTP status, carrying the
    /// backend-provided message when one was extracted from the body.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => AppError::Unauthorized(message),
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            _ => AppError::Api { status, message },
        }
    }

    /// True when the record addressed by a single-record fetch is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        // Status-bearing failures are mapped at the call site where the
        // response body is still readable; anything arriving here lost the
        // connection or the body.
        AppError::Transport(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = Vec::new();
        for (field, errors) in e.field_errors() {
            for error in errors {
                match &error.message {
                    Some(msg) => parts.push(msg.to_string()),
                    None => parts.push(format!("{} is invalid", field)),
                }
            }
        }
        parts.sort();
        AppError::Validation(parts.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
