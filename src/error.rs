//! Error types for blitz.

use thiserror::Error;

/// Errors produced by the blitz client.
#[derive(Debug, Error)]
pub enum BlitzError {
    /// Login or registration was refused by the server.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// No token is available for an authenticated request.
    #[error("Not logged in. Run 'blitz login' first.")]
    NotAuthenticated,

    /// The server rejected the bearer token or the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP transport error (connection refused, timeout, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// A requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected before reaching the server.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON could not be parsed or produced.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup, drawing or input failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl BlitzError {
    /// Whether repeating the request may succeed.
    ///
    /// Transport failures, rate limiting and server errors are retryable.
    /// Client errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => !e.is_builder() && !e.is_decode(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the server answered and refused the given credentials.
    ///
    /// A transport failure is never a credential rejection.
    #[must_use]
    pub const fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::NotFound(_))
    }
}
