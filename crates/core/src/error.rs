//! Error types for the Recall domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Recall operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Credential gating ---
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- User input ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for errors the user fixes by entering a (new) API key.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }

    /// True for a rejected memory import.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Memory(MemoryError::Format(_)))
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("No API key provided for {0}")]
    MissingCredential(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid memory format: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 500,
            message: "upstream unavailable".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[test]
    fn format_error_is_classified() {
        let err: Error = MemoryError::Format("expected value at line 1".into()).into();
        assert!(err.is_format());
        assert!(!err.is_missing_credential());
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn missing_credential_is_classified() {
        let err = Error::MissingCredential("no API key set".into());
        assert!(err.is_missing_credential());
        assert!(!err.is_format());
    }
}
