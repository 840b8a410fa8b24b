//! Charging backend error types

use thiserror::Error;

/// Errors that can occur when talking to the trip planning backend
#[derive(Debug, Error)]
pub enum ChargingApiError {
    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the backend failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a backend response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The backend could not compute a route for the submission
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

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

impl ChargingApiError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
