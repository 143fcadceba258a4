//! Error types for the CivicLens domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Provider failures carry a coarse classification (`ErrorKind`) so the HTTP
//! layer can distinguish an upstream fault from a local one.

use thiserror::Error;

/// The top-level error type for all CivicLens operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a provider failure.
///
/// Mirrors how the caller should react: `Transport` and `HttpStatus` are
/// upstream problems, `Unexpected` is a broken contract (malformed body,
/// missing field). None of these are ever cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network-level failure reaching the provider (includes timeouts).
    Transport,
    /// The provider answered with a non-2xx status.
    HttpStatus,
    /// The provider answered 2xx but the body violated the expected shape.
    Unexpected,
}

/// A classified failure from the LLM provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API request failed (status: {status_code})")]
    ApiError { status_code: u16, body: String },

    #[error("Unexpected provider response: {0}")]
    Unexpected(String),
}

impl ProviderError {
    /// Classify this error for the HTTP layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Network(_) | ProviderError::Timeout(_) => ErrorKind::Transport,
            ProviderError::ApiError { .. } => ErrorKind::HttpStatus,
            ProviderError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Raw detail text suitable for the error-response `details` field.
    pub fn details(&self) -> &str {
        match self {
            ProviderError::Network(s)
            | ProviderError::Timeout(s)
            | ProviderError::Unexpected(s) => s,
            ProviderError::ApiError { body, .. } => body,
        }
    }
}
