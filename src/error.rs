// src/error.rs

//! Unified error handling for the shortage tracker.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Connection, DNS or timeout failure while talking to the data source
    #[error("Network error: {0}")]
    Network(String),

    /// Data source answered with a non-2xx status
    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    /// Response body does not carry a `results` array
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Persisted snapshot exists but cannot be read back
    #[error("Corrupt snapshot store at {path}: {message}")]
    CorruptStore { path: String, message: String },

    /// Argument or configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// Create a network error.
    pub fn network(message: impl fmt::Display) -> Self {
        Self::Network(message.to_string())
    }

    /// Create an HTTP status error.
    pub fn http(status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            status,
            reason: reason.into(),
        }
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Create a corrupt store error for the given snapshot location.
    pub fn corrupt_store(path: &Path, message: impl fmt::Display) -> Self {
        Self::CorruptStore {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
