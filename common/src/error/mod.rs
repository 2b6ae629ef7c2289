//! Error types for the exchange proxy
//!
//! This module provides a unified error handling system for the gateway
//! and the connector layer. It defines the error taxonomy that the
//! gateway maps to HTTP statuses, so a connector failure carries enough
//! classification to pick the right response without string matching.

use thiserror::Error;

/// Exchange proxy error type
#[derive(Debug, Error)]
pub enum Error {
    /// A required request field is absent or empty
    #[error("Missing required fields")]
    MissingField(String),

    /// Exchange name outside the supported set
    #[error("Unsupported exchange: {0}")]
    UnsupportedExchange(String),

    /// The exchange rejected the supplied API credentials
    #[error("Authentication failed: {0}")]
    ExchangeAuth(String),

    /// Transport-level failure reaching the exchange
    #[error("Network error: {0}")]
    Network(String),

    /// The exchange answered with a business-level error
    #[error("Exchange error {code}: {message}")]
    ExchangeApi {
        /// Exchange-assigned error code
        code: i64,
        /// Exchange-supplied message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}
