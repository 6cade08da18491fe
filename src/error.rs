//! Error types for the Stockast client SDK

use thiserror::Error;

/// Errors that can occur in the Stockast client SDK
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Base64 text could not be collapsed back into a string
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Transport error
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The server answered with a non-success status
    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    UrlError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::UrlError(err.to_string())
    }
}
