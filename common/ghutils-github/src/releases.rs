//! Release operations

use crate::client::GitHubClient;
use crate::error::Result;
use crate::repository::RepoHandle;
use crate::transport::{HttpTransport, RawRequest};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Payload for creating a release
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl NewRelease {
    /// A published release named after its tag
    pub fn new(version: &str, target: &str, body: impl Into<String>) -> Self {
        Self {
            tag_name: version.to_string(),
            target_commitish: target.to_string(),
            name: version.to_string(),
            body: body.into(),
            draft: false,
            prerelease: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub html_url: String,
}

impl GitHubClient {
    /// Create a release
    ///
    /// # Errors
    /// GitHub answers 422 when the tag already has a release and 404 when the
    /// token cannot see or write the repository; both surface as
    /// [`crate::GitHubError::Api`] with the status preserved.
    pub async fn create_release(&self, repo: &RepoHandle, release: &NewRelease) -> Result<Release> {
        let request = RawRequest::new(Method::POST, self.repo_url(repo, "/releases"))
            .with_body(serde_json::to_value(release)?);

        self.send(request).await?.error_for_status()?.json()
    }
}
