//! Error types for the image search library.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Provider-level variants never reach API callers: adapters absorb them
/// and report an empty result instead. Only [`SearchError::InvalidQuery`]
/// and [`SearchError::NoSources`] are surfaced by the aggregation layer.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Provider '{provider}' returned HTTP {status}")]
    Status { provider: String, status: u16 },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client-credentials token exchange failed.
    #[error("Token exchange for '{0}' failed: {1}")]
    Auth(String, String),

    /// Provider has no configured credentials.
    #[error("Provider '{0}' is missing credentials")]
    MissingCredentials(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// None of the requested sources is known.
    #[error("No valid source specified")]
    NoSources,
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
