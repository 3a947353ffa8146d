//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. Errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Maximum number of response body characters carried in an HTTP error
pub const ERROR_BODY_LIMIT: usize = 200;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration-related errors (missing connection parameters, invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// weclapp API errors
    #[error("weclapp error: {0}")]
    Weclapp(#[from] WeclappError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ReportError {
    /// Whether this error stems from configuration rather than a runtime failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, ReportError::Configuration(_))
    }
}

/// weclapp-specific errors
///
/// Errors that occur when talking to the weclapp REST API.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum WeclappError {
    /// Failed to connect to the weclapp server
    #[error("Failed to connect to weclapp: {0}")]
    ConnectionFailed(String),

    /// Response body matched none of the recognized layouts
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl WeclappError {
    /// Build the error for an HTTP status >= 400
    ///
    /// The body text is truncated to [`ERROR_BODY_LIMIT`] characters.
    pub fn from_status(status: u16, url: &str, body: &str) -> Self {
        let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        let message = format!("HTTP {status} error for {url}: {snippet}");
        if status >= 500 {
            WeclappError::ServerError { status, message }
        } else {
            WeclappError::ClientError { status, message }
        }
    }

    /// HTTP status code, when the error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            WeclappError::ServerError { status, .. } | WeclappError::ClientError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            ReportError::Io(err.to_string())
        } else {
            ReportError::Serialization(err.to_string())
        }
    }
}
