//! GitHub REST client library
//!
//! This library provides the authenticated HTTP plumbing used by `ghutils`:
//! typed operations for the endpoints the CLI needs, and a raw request
//! capability for endpoints that are not modelled.
//!
//! ## Modules
//!
//! - [`client`]: Core GitHub client implementation
//! - [`transport`]: Raw request/response types and the [`HttpTransport`] trait
//! - [`issues`]: Issue creation
//! - [`pull_requests`]: Pull request retrieval and updates
//! - [`git`]: Branch lookup and git reference management
//! - [`releases`]: Release creation
//! - [`error`]: Error type shared by all operations

mod client;
mod error;
mod git;
mod issues;
mod pull_requests;
mod releases;
mod repository;
mod transport;

// Re-export public API
pub use client::{DEFAULT_API_BASE, GitHubClient, JSON_MEDIA_TYPE, USER_AGENT};
pub use error::{GitHubError, Result};
pub use git::{Branch, BranchCommit, GitObject, GitRef};
pub use issues::{Issue, NewIssue};
pub use pull_requests::PullRequest;
pub use releases::{NewRelease, Release};
pub use repository::{RepoHandle, branch_path};
pub use reqwest::Method;
pub use transport::{HttpTransport, RawRequest, RawResponse};
