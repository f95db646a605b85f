//! Branch lookup and git reference operations

use crate::client::GitHubClient;
use crate::error::Result;
use crate::repository::{RepoHandle, branch_path};
use crate::transport::{HttpTransport, RawRequest};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug, Clone)]
pub struct Branch {
    pub commit: BranchCommit,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BranchCommit {
    pub sha: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitObject,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GitObject {
    pub sha: String,
}

impl GitHubClient {
    /// Look up a branch, returning `None` when it does not exist
    pub async fn get_branch(&self, repo: &RepoHandle, branch: &str) -> Result<Option<Branch>> {
        let url = self.repo_url(repo, &format!("/branches/{}", branch_path(branch)));
        let response = self.send(RawRequest::new(Method::GET, url)).await?;

        if response.status == 404 {
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json()?))
    }

    /// Create `refs/heads/{branch}` pointing at `sha`
    pub async fn create_branch_ref(
        &self,
        repo: &RepoHandle,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef> {
        let request = RawRequest::new(Method::POST, self.repo_url(repo, "/git/refs")).with_body(
            json!({
                "ref": format!("refs/heads/{}", branch),
                "sha": sha,
            }),
        );

        self.send(request).await?.error_for_status()?.json()
    }

    /// Delete `refs/heads/{branch}`
    pub async fn delete_branch_ref(&self, repo: &RepoHandle, branch: &str) -> Result<()> {
        let url = self.repo_url(repo, &format!("/git/refs/heads/{}", branch_path(branch)));

        self.send(RawRequest::new(Method::DELETE, url))
            .await?
            .error_for_status()?;
        Ok(())
    }
}
