//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every variant is non-fatal: the coordinator turns it into a user-visible
/// notification and keeps the last known-good state.
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// User refused location permission
    #[error("Location permission denied")]
    PermissionDenied,

    /// Device could not produce a location fix
    #[error("Current location unavailable: {0}")]
    LocationUnavailable(String),

    /// Transport failure or timeout talking to a remote service
    #[error("Network error: {0}")]
    Network(String),

    /// Remote provider answered with a non-success status
    #[error("Provider error: {status}")]
    Provider {
        /// Provider status code (e.g., "OVER_QUERY_LIMIT")
        status: String,
    },

    /// Remote response did not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Local storage failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a provider error from a status code
    pub fn provider(status: impl Into<String>) -> Self {
        Self::Provider {
            status: status.into(),
        }
    }
}
