//! Central constants for the ghutils application

/// Default values for GitHub operations
pub mod github {
    /// GitHub API base URL
    pub const API_BASE: &str = ghutils_github::DEFAULT_API_BASE;

    /// Media type required by the branch protection API while it is in preview
    pub const PROTECTION_PREVIEW_MEDIA_TYPE: &str = "application/vnd.github.loki-preview+json";

    /// Sub-path of the admin enforcement setting under a branch's protection resource
    pub const ENFORCE_ADMINS_POSTFIX: &str = "/enforce_admins";
}

/// Values used when filing and linking issues
pub mod issues {
    /// Prefix for titles of issues filed for failed builds
    pub const BUILD_FAILURE_TITLE_PREFIX: &str = "JBF: ";

    /// Issue tracker browse URL; the issue key is appended
    pub const DEFAULT_ISSUE_TRACKER_URL: &str = "https://rpc-openstack.atlassian.net/browse/";
}
