//! GitHub client implementation

use crate::repository::RepoHandle;
use std::fmt;

/// Public GitHub API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Media type requested when an endpoint needs no preview features
pub const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// User-Agent header sent with every request
pub const USER_AGENT: &str = concat!("ghutils/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for making authenticated requests
///
/// Typed operations live in the endpoint modules (`issues`, `pull_requests`,
/// `git`, `releases`), each extending this struct with an `impl` block. All of
/// them funnel through [`crate::HttpTransport::send`].
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    api_base: String,
}

impl GitHubClient {
    /// Create a client for the public GitHub API authenticated with `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API root (GitHub Enterprise, test servers)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build the URL of a repository sub-resource, `path` starting with `/`
    pub(crate) fn repo_url(&self, repo: &RepoHandle, path: &str) -> String {
        format!("{}{}", repo.api_url(&self.api_base), path)
    }

    pub(crate) fn authorization(&self) -> String {
        format!("token {}", self.token)
    }
}

// Never print the token, even with {:?}.
impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .finish()
    }
}
