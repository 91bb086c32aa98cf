//! Places error types

use thiserror::Error;

/// Errors that can occur during places operations
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Connection to the places service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response did not match the expected schema
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider answered with a status other than OK
    #[error("Provider returned {status}{}", message_suffix(.message))]
    ProviderStatus {
        /// Provider status code (e.g., "OVER_QUERY_LIMIT")
        status: String,
        /// Optional provider error message
        message: Option<String>,
    },

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl PlacesError {
    /// Returns true if this error is caused by the network transport
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
