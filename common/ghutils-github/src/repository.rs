//! Repository identification

use std::fmt;

/// Identifies the repository every request is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    pub owner: String,
    pub name: String,
}

impl RepoHandle {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// URL of the repository resource under the given API base,
    /// e.g. `https://api.github.com/repos/owner/name`
    pub fn api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.name
        )
    }
}

/// Percent-encode a branch name for use in a URL path
///
/// Each `/`-separated component is encoded on its own so that
/// `release/r14.1` stays two path segments while `#`, `%`, `?` and spaces
/// cannot cut the path short.
pub fn branch_path(branch: &str) -> String {
    branch
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for RepoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
