//! Issue operations

use crate::client::GitHubClient;
use crate::error::Result;
use crate::repository::RepoHandle;
use crate::transport::{HttpTransport, RawRequest};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Payload for creating an issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub html_url: String,
    pub title: String,
}

impl GitHubClient {
    /// Create an issue in `repo`
    pub async fn create_issue(&self, repo: &RepoHandle, issue: &NewIssue) -> Result<Issue> {
        let request = RawRequest::new(Method::POST, self.repo_url(repo, "/issues"))
            .with_body(serde_json::to_value(issue)?);

        self.send(request).await?.error_for_status()?.json()
    }
}
