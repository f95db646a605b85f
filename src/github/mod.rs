//! GitHub integration module
//!
//! ## Architecture
//!
//! - [`repository`]: [`RepositoryApi`], the typed calls commands make, and
//!   [`RepoClient`], its implementation over `ghutils_github::GitHubClient`
//! - [`protection`]: [`BranchProtectionGateway`], raw requests against the
//!   branch protection preview API
//! - [`types`]: Branch protection documents and the skeleton/stored merge
//!
//! The low-level HTTP plumbing lives in the `ghutils-github` crate.

pub mod protection;
pub mod repository;
pub mod types;

pub use protection::BranchProtectionGateway;
pub use repository::{RepoClient, RepositoryApi};
pub use types::{ProtectionPayload, ProtectionSettings};
