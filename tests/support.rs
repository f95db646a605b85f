//! Common test support utilities and fixtures
//!
//! In-memory stand-ins for the GitHub API: [`FakeRepository`] implements
//! `RepositoryApi`, [`FakeProtectionApi`] implements `HttpTransport` for the
//! branch protection endpoints. Both record every call so tests can assert
//! on what was (and was not) sent.

#![allow(dead_code)]

use async_trait::async_trait;
use ghutils::{BranchProtectionGateway, CommandContext, Logger, RepositoryApi};
use ghutils_github::{
    GitHubError, HttpTransport, Issue, Method, NewIssue, NewRelease, PullRequest, RawRequest,
    RawResponse, Release, RepoHandle, Result,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::process::Command;
use std::sync::{Arc, Mutex};

pub const API_BASE: &str = "https://api.github.com";

/// Call log shared between fakes, to check ordering across them
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Index of `entry` in `journal`, panicking when it was never recorded
pub fn position_of(journal: &Journal, entry: &str) -> usize {
    journal
        .lock()
        .unwrap()
        .iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("{} not recorded", entry))
}

pub fn repo_handle() -> RepoHandle {
    RepoHandle::new("rcbops", "rpc-openstack")
}

#[derive(Default)]
pub struct RepositoryState {
    /// Branch name to head SHA
    pub branches: HashMap<String, String>,
    /// Pull request number to body
    pub pull_requests: HashMap<u64, Option<String>>,
    pub issues: Vec<NewIssue>,
    pub releases: Vec<NewRelease>,
    /// Every call, e.g. `"delete_branch newton-rc"`
    pub calls: Vec<String>,
    /// After `create_branch` of the first branch, move it to the second SHA
    pub move_after_create: Option<(String, String)>,
    pub release_status: Option<u16>,
    pub update_status: Option<u16>,
    /// Status returned by `delete_branch` instead of deleting
    pub delete_status: Option<u16>,
    /// Status returned by `create_branch` instead of creating
    pub create_status: Option<u16>,
}

pub struct FakeRepository {
    handle: RepoHandle,
    journal: Journal,
    pub state: Mutex<RepositoryState>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self {
            handle: repo_handle(),
            journal: Journal::default(),
            state: Mutex::new(RepositoryState::default()),
        }
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = journal.clone();
        self
    }

    pub fn with_branch(self, name: &str, sha: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .branches
            .insert(name.to_string(), sha.to_string());
        self
    }

    pub fn with_pull_request(self, number: u64, body: Option<&str>) -> Self {
        self.state
            .lock()
            .unwrap()
            .pull_requests
            .insert(number, body.map(str::to_string));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn branch(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().branches.get(name).cloned()
    }

    pub fn pull_request_body(&self, number: u64) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .pull_requests
            .get(&number)
            .cloned()
            .flatten()
    }

    fn record(&self, call: String) {
        self.journal.lock().unwrap().push(call.clone());
        self.state.lock().unwrap().calls.push(call);
    }
}

fn pull_request(number: u64, body: Option<String>) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/rcbops/rpc-openstack/pull/{}", number),
        title: "Change".to_string(),
        body,
    }
}

#[async_trait]
impl RepositoryApi for FakeRepository {
    fn handle(&self) -> &RepoHandle {
        &self.handle
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<Issue> {
        self.record(format!("create_issue {}", issue.title));
        let mut state = self.state.lock().unwrap();
        state.issues.push(issue.clone());
        let number = state.issues.len() as u64;
        Ok(Issue {
            number,
            html_url: format!("https://github.com/rcbops/rpc-openstack/issues/{}", number),
            title: issue.title.clone(),
        })
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.record(format!("get_pull_request {}", number));
        let state = self.state.lock().unwrap();
        match state.pull_requests.get(&number) {
            Some(body) => Ok(pull_request(number, body.clone())),
            None => Err(GitHubError::from_response(404, r#"{"message":"Not Found"}"#)),
        }
    }

    async fn update_pull_request_body(&self, number: u64, body: &str) -> Result<PullRequest> {
        self.record(format!("update_pull_request_body {}", number));
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.update_status {
            return Err(GitHubError::from_response(status, ""));
        }
        state.pull_requests.insert(number, Some(body.to_string()));
        Ok(pull_request(number, Some(body.to_string())))
    }

    async fn branch_sha(&self, branch: &str) -> Result<Option<String>> {
        self.record(format!("branch_sha {}", branch));
        Ok(self.state.lock().unwrap().branches.get(branch).cloned())
    }

    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()> {
        self.record(format!("create_branch {} {}", branch, sha));
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.create_status {
            return Err(GitHubError::from_response(status, r#"{"message":"forced"}"#));
        }
        if state.branches.contains_key(branch) {
            return Err(GitHubError::from_response(
                422,
                r#"{"message":"Reference already exists"}"#,
            ));
        }
        let moved = match &state.move_after_create {
            Some((name, other_sha)) if name == branch => other_sha.clone(),
            _ => sha.to_string(),
        };
        state.branches.insert(branch.to_string(), moved);
        Ok(())
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("delete_branch {}", branch));
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.delete_status {
            return Err(GitHubError::from_response(status, r#"{"message":"forced"}"#));
        }
        match state.branches.remove(branch) {
            Some(_) => Ok(()),
            None => Err(GitHubError::from_response(
                422,
                r#"{"message":"Reference does not exist"}"#,
            )),
        }
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release> {
        self.record(format!("create_release {}", release.tag_name));
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.release_status {
            return Err(GitHubError::from_response(status, r#"{"message":"failed"}"#));
        }
        state.releases.push(release.clone());
        Ok(Release {
            id: state.releases.len() as u64,
            tag_name: release.tag_name.clone(),
            html_url: format!(
                "https://github.com/rcbops/rpc-openstack/releases/tag/{}",
                release.tag_name
            ),
        })
    }
}

#[derive(Default)]
pub struct ProtectionState {
    /// Branch name to protection document as GitHub returns it
    pub protected: HashMap<String, Value>,
    /// Payloads received by `PUT .../protection`, per branch
    pub applied: HashMap<String, Value>,
    pub requests: Vec<RawRequest>,
    /// Status forced for `(method, branch)` on the protection resource
    pub forced_status: HashMap<(Method, String), u16>,
}

#[derive(Default)]
pub struct FakeProtectionApi {
    journal: Journal,
    pub state: Mutex<ProtectionState>,
}

impl FakeProtectionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = journal.clone();
        self
    }

    pub fn with_protection(self, branch: &str, settings: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .protected
            .insert(branch.to_string(), settings);
        self
    }

    pub fn with_forced_status(self, method: Method, branch: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .forced_status
            .insert((method, branch.to_string()), status);
        self
    }

    pub fn applied(&self, branch: &str) -> Option<Value> {
        self.state.lock().unwrap().applied.get(branch).cloned()
    }

    pub fn is_protected(&self, branch: &str) -> bool {
        self.state.lock().unwrap().protected.contains_key(branch)
    }

    pub fn requests(&self) -> Vec<RawRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// `(method, url suffix after the repository)` of every request
    pub fn request_log(&self) -> Vec<(Method, String)> {
        let prefix = repo_handle().api_url(API_BASE);
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.url.trim_start_matches(&prefix).to_string()))
            .collect()
    }
}

/// Split `.../branches/{branch}/protection{postfix}` into branch and postfix
fn parse_protection_url(url: &str) -> (String, String) {
    let after = url
        .split_once("/branches/")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let (branch, postfix) = after.split_once("/protection").unwrap_or((after, ""));
    (branch.to_string(), postfix.to_string())
}

#[async_trait]
impl HttpTransport for FakeProtectionApi {
    async fn send(&self, request: RawRequest) -> Result<RawResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let (branch, postfix) = parse_protection_url(&request.url);
        self.journal.lock().unwrap().push(format!(
            "{} {}/protection{}",
            request.method, branch, postfix
        ));
        let not_protected = RawResponse::new(404, r#"{"message":"Branch not protected"}"#);

        if postfix.is_empty() {
            if let Some(status) = state.forced_status.get(&(request.method.clone(), branch.clone()))
            {
                return Ok(RawResponse::new(*status, r#"{"message":"forced"}"#));
            }
        }

        let response = match (request.method.as_str(), postfix.as_str()) {
            ("GET", "") => match state.protected.get(&branch) {
                Some(settings) => RawResponse::new(200, settings.to_string()),
                None => not_protected,
            },
            ("DELETE", "") => match state.protected.remove(&branch) {
                Some(_) => RawResponse::new(204, ""),
                None => not_protected,
            },
            ("PUT", "") => {
                let body = request.body.clone().unwrap_or(Value::Null);
                let enforce = body["enforce_admins"].as_bool().unwrap_or(false);
                state.applied.insert(branch.clone(), body);
                state.protected.insert(
                    branch.clone(),
                    json!({"enforce_admins": {"enabled": enforce}}),
                );
                RawResponse::new(200, "{}")
            }
            (method, "/enforce_admins") => match state.protected.get_mut(&branch) {
                Some(settings) => match method {
                    "POST" => {
                        settings["enforce_admins"] = json!({"enabled": true});
                        RawResponse::new(200, settings["enforce_admins"].to_string())
                    }
                    "DELETE" => {
                        settings["enforce_admins"] = json!({"enabled": false});
                        RawResponse::new(204, "")
                    }
                    _ => RawResponse::new(200, settings["enforce_admins"].to_string()),
                },
                None => not_protected,
            },
            _ => RawResponse::new(405, r#"{"message":"unsupported"}"#),
        };

        Ok(response)
    }
}

/// Context wiring the fakes together with a silent logger
pub fn context<'a>(
    repository: &'a FakeRepository,
    protection: &'a FakeProtectionApi,
    logger: &'a Logger,
) -> CommandContext<'a> {
    CommandContext {
        repository,
        protection: BranchProtectionGateway::new(protection, API_BASE, repo_handle()),
        logger,
    }
}

/// Protection document in the shape `GET .../protection` returns
pub fn stored_protection() -> Value {
    json!({
        "url": "https://api.github.com/repos/rcbops/rpc-openstack/branches/newton-rc/protection",
        "required_status_checks": {
            "url": "https://api.github.com/repos/rcbops/rpc-openstack/branches/newton-rc/protection/required_status_checks",
            "strict": true,
            "contexts": ["continuous-integration/jenkins"],
            "contexts_url": "https://api.github.com/repos/rcbops/rpc-openstack/branches/newton-rc/protection/required_status_checks/contexts"
        },
        "enforce_admins": {
            "url": "https://api.github.com/repos/rcbops/rpc-openstack/branches/newton-rc/protection/enforce_admins",
            "enabled": false
        },
        "required_pull_request_reviews": {
            "url": "https://api.github.com/repos/rcbops/rpc-openstack/branches/newton-rc/protection/required_pull_request_reviews",
            "dismiss_stale_reviews": true,
            "require_code_owner_reviews": false,
            "required_approving_review_count": 2
        },
        "restrictions": {
            "url": "https://api.github.com/repos/rcbops/rpc-openstack/branches/newton-rc/protection/restrictions",
            "users": [{"login": "release-bot", "id": 7}],
            "teams": [{"slug": "rpc-release", "id": 9}],
            "apps": []
        }
    })
}

/// Result of running the CLI binary
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the ghutils binary with given arguments
pub fn run_cli(args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_ghutils"))
        .args(args)
        .output()
        .expect("Failed to execute ghutils");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
