//! Error type for GitHub API operations

use serde::Deserialize;
use thiserror::Error;

/// Result alias used throughout the client
pub type Result<T> = std::result::Result<T, GitHubError>;

/// Errors produced while talking to the GitHub API
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The API answered with a non-success status code
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request could not be sent or the response could not be read
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("Failed to parse GitHub API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request itself could not be built (e.g. a malformed header)
    #[error("Invalid GitHub request: {0}")]
    InvalidRequest(String),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GitHubError {
    /// Build an [`GitHubError::Api`] from a failed response.
    ///
    /// GitHub reports failures as `{"message": "..."}`; when the body has
    /// that shape only the message is kept, otherwise the raw body is used.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.message,
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body.trim().to_string(),
        };
        GitHubError::Api { status, message }
    }

    /// HTTP status code associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Api { status, .. } => Some(*status),
            GitHubError::Transport(e) => e.status().map(|s| s.as_u16()),
            GitHubError::Decode(_) | GitHubError::InvalidRequest(_) => None,
        }
    }
}
