//! Common error types for Letterbox.

use thiserror::Error;

/// Top-level error type for Letterbox operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No valid session for the caller.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// OAuth consent or code exchange failed.
    #[error("Provider auth failure: {0}")]
    ProviderAuth(String),

    /// Upstream file API call failed (network error or non-2xx response).
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Session store read/write/destroy failed.
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network-level failure before an upstream response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
