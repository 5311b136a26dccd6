// src/error.rs
// =============================================================================
// Errors produced while fetching and building the project list.
//
// There are exactly three ways a fetch can fail, and callers care about the
// difference between them:
// - NotFound: the GitHub user does not exist
// - RateLimited: GitHub refused the request because the quota ran out
// - Transport: everything else (network, bad JSON, unexpected status)
//
// The application shell (CLI, config loading) keeps using anyhow::Result;
// this typed error is only for the aggregator core.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from #[error] attributes
// - From impls: let `?` turn library errors into ours
// =============================================================================

use thiserror::Error;

/// Result type alias for aggregator operations.
pub type Result<T> = std::result::Result<T, AggregatorError>;

#[derive(Error, Debug)]
pub enum AggregatorError {
    /// The requested GitHub user does not exist (HTTP 404)
    #[error("GitHub user \"{username}\" not found")]
    NotFound { username: String },

    /// GitHub reported that the API quota is exhausted (HTTP 403 / 429)
    #[error("GitHub API rate limit exceeded. Consider using a personal access token.")]
    RateLimited,

    /// Network failure, malformed response or unexpected status
    #[error("Failed to fetch repositories from GitHub: {0}")]
    Transport(String),
}

impl AggregatorError {
    /// Create a transport error from anything printable.
    pub fn transport(message: impl std::fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }
}

impl From<reqwest::Error> for AggregatorError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Transport("request timed out".to_string())
        } else {
            Self::transport(error)
        }
    }
}

impl From<serde_json::Error> for AggregatorError {
    fn from(error: serde_json::Error) -> Self {
        Self::Transport(format!("malformed response: {}", error))
    }
}
