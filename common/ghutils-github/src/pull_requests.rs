//! Pull request operations

use crate::client::GitHubClient;
use crate::error::Result;
use crate::repository::RepoHandle;
use crate::transport::{HttpTransport, RawRequest};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    pub title: String,
    /// GitHub sends `null` for pull requests created without a description
    #[serde(default)]
    pub body: Option<String>,
}

impl GitHubClient {
    /// Get a specific pull request by number
    pub async fn get_pull_request(&self, repo: &RepoHandle, number: u64) -> Result<PullRequest> {
        let url = self.repo_url(repo, &format!("/pulls/{}", number));

        self.send(RawRequest::new(Method::GET, url))
            .await?
            .error_for_status()?
            .json()
    }

    /// Replace the description of a pull request
    pub async fn update_pull_request_body(
        &self,
        repo: &RepoHandle,
        number: u64,
        body: &str,
    ) -> Result<PullRequest> {
        let url = self.repo_url(repo, &format!("/pulls/{}", number));
        let request = RawRequest::new(Method::PATCH, url).with_body(json!({ "body": body }));

        self.send(request).await?.error_for_status()?.json()
    }
}
