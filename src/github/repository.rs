//! Repository-scoped GitHub operations
//!
//! [`RepositoryApi`] is the set of typed calls the commands need, already
//! bound to one repository. [`RepoClient`] implements it on top of
//! [`GitHubClient`]; tests substitute in-memory implementations.

use async_trait::async_trait;
use ghutils_github::{
    GitHubClient, Issue, NewIssue, NewRelease, PullRequest, Release, RepoHandle, Result,
};

#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Repository every call is scoped to
    fn handle(&self) -> &RepoHandle;

    async fn create_issue(&self, issue: &NewIssue) -> Result<Issue>;

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;

    async fn update_pull_request_body(&self, number: u64, body: &str) -> Result<PullRequest>;

    /// Head commit SHA of `branch`, `None` when the branch does not exist
    async fn branch_sha(&self, branch: &str) -> Result<Option<String>>;

    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()>;

    async fn delete_branch(&self, branch: &str) -> Result<()>;

    async fn create_release(&self, release: &NewRelease) -> Result<Release>;
}

/// [`RepositoryApi`] backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct RepoClient {
    client: GitHubClient,
    repo: RepoHandle,
}

impl RepoClient {
    pub fn new(client: GitHubClient, repo: RepoHandle) -> Self {
        Self { client, repo }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }
}

#[async_trait]
impl RepositoryApi for RepoClient {
    fn handle(&self) -> &RepoHandle {
        &self.repo
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<Issue> {
        self.client.create_issue(&self.repo, issue).await
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.client.get_pull_request(&self.repo, number).await
    }

    async fn update_pull_request_body(&self, number: u64, body: &str) -> Result<PullRequest> {
        self.client
            .update_pull_request_body(&self.repo, number, body)
            .await
    }

    async fn branch_sha(&self, branch: &str) -> Result<Option<String>> {
        let branch = self.client.get_branch(&self.repo, branch).await?;
        Ok(branch.map(|b| b.commit.sha))
    }

    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()> {
        self.client
            .create_branch_ref(&self.repo, branch, sha)
            .await
            .map(|_| ())
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        self.client.delete_branch_ref(&self.repo, branch).await
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release> {
        self.client.create_release(&self.repo, release).await
    }
}
