//! Branch protection documents
//!
//! GitHub reads and writes branch protection in two different shapes. The
//! document returned by `GET .../protection` reports toggles as
//! `{"enabled": bool, "url": ...}` objects and actors as full user/team/app
//! objects. The document accepted by `PUT .../protection` wants plain
//! booleans and login/slug strings. [`ProtectionSettings`] models the former,
//! [`ProtectionPayload`] the latter, and [`ProtectionPayload::merge`] converts
//! field by field.

use serde::{Deserialize, Serialize};

/// A toggle as GitHub reports it, e.g. `enforce_admins`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnabledSetting {
    pub enabled: bool,
}

/// Required status checks; read and written in the same shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChecks {
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<StatusCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Teams and apps are both identified by slug
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slugged {
    pub slug: String,
}

/// A set of users, teams and apps as GitHub reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoredActors {
    #[serde(default)]
    pub users: Vec<Account>,
    #[serde(default)]
    pub teams: Vec<Slugged>,
    #[serde(default)]
    pub apps: Vec<Slugged>,
}

impl StoredActors {
    fn logins(&self) -> Vec<String> {
        self.users.iter().map(|u| u.login.clone()).collect()
    }

    fn team_slugs(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.slug.clone()).collect()
    }

    fn app_slugs(&self) -> Vec<String> {
        self.apps.iter().map(|a| a.slug.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoredReviewRules {
    pub dismissal_restrictions: Option<StoredActors>,
    #[serde(default)]
    pub dismiss_stale_reviews: bool,
    #[serde(default)]
    pub require_code_owner_reviews: bool,
    pub required_approving_review_count: Option<u8>,
    pub require_last_push_approval: Option<bool>,
    pub bypass_pull_request_allowances: Option<StoredActors>,
}

/// Protection settings as returned by `GET .../branches/{branch}/protection`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProtectionSettings {
    pub required_status_checks: Option<StatusChecks>,
    pub enforce_admins: Option<EnabledSetting>,
    pub required_pull_request_reviews: Option<StoredReviewRules>,
    pub restrictions: Option<StoredActors>,
    pub required_linear_history: Option<EnabledSetting>,
    pub allow_force_pushes: Option<EnabledSetting>,
    pub allow_deletions: Option<EnabledSetting>,
    pub block_creations: Option<EnabledSetting>,
    pub required_conversation_resolution: Option<EnabledSetting>,
    pub lock_branch: Option<EnabledSetting>,
    pub allow_fork_syncing: Option<EnabledSetting>,
}

/// Users, teams and apps by login/slug. Empty lists are omitted, so the
/// default value serializes as `{}`, which GitHub reads as "no restrictions".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActorLogins {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<String>,
}

impl From<&StoredActors> for ActorLogins {
    fn from(stored: &StoredActors) -> Self {
        Self {
            users: stored.logins(),
            teams: stored.team_slugs(),
            apps: stored.app_slugs(),
        }
    }
}

/// Push restrictions; GitHub requires `users` and `teams` whenever the
/// object is present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushRestrictions {
    pub users: Vec<String>,
    pub teams: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<String>,
}

impl From<&StoredActors> for PushRestrictions {
    fn from(stored: &StoredActors) -> Self {
        Self {
            users: stored.logins(),
            teams: stored.team_slugs(),
            apps: stored.app_slugs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewRules {
    pub dismissal_restrictions: ActorLogins,
    pub dismiss_stale_reviews: bool,
    pub require_code_owner_reviews: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_pull_request_allowances: Option<ActorLogins>,
}

impl From<&StoredReviewRules> for ReviewRules {
    fn from(stored: &StoredReviewRules) -> Self {
        Self {
            dismissal_restrictions: stored
                .dismissal_restrictions
                .as_ref()
                .map(ActorLogins::from)
                .unwrap_or_default(),
            dismiss_stale_reviews: stored.dismiss_stale_reviews,
            require_code_owner_reviews: stored.require_code_owner_reviews,
            required_approving_review_count: stored.required_approving_review_count,
            require_last_push_approval: stored.require_last_push_approval,
            bypass_pull_request_allowances: stored
                .bypass_pull_request_allowances
                .as_ref()
                .map(ActorLogins::from),
        }
    }
}

/// Body of `PUT .../branches/{branch}/protection`
///
/// The four core fields are always serialized, as `null` when unset, because
/// GitHub rejects the request if any of them is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectionPayload {
    pub required_status_checks: Option<StatusChecks>,
    pub enforce_admins: bool,
    pub required_pull_request_reviews: Option<ReviewRules>,
    pub restrictions: Option<PushRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_linear_history: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_force_pushes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deletions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_creations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_conversation_resolution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_branch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_fork_syncing: Option<bool>,
}

impl ProtectionPayload {
    /// Protection applied to a release candidate branch that had none:
    /// no required status checks, admins included, pull request reviews
    /// required without dismissal restrictions or stale-review dismissal,
    /// and no push restrictions.
    pub fn skeleton() -> Self {
        Self {
            required_status_checks: None,
            enforce_admins: true,
            required_pull_request_reviews: Some(ReviewRules::default()),
            restrictions: None,
            required_linear_history: None,
            allow_force_pushes: None,
            allow_deletions: None,
            block_creations: None,
            required_conversation_resolution: None,
            lock_branch: None,
            allow_fork_syncing: None,
        }
    }

    /// Overlay previously stored settings; every field present in `stored`
    /// replaces the corresponding field of `self`.
    pub fn merge(mut self, stored: &ProtectionSettings) -> Self {
        if let Some(checks) = &stored.required_status_checks {
            self.required_status_checks = Some(checks.clone());
        }
        if let Some(admins) = stored.enforce_admins {
            self.enforce_admins = admins.enabled;
        }
        if let Some(reviews) = &stored.required_pull_request_reviews {
            self.required_pull_request_reviews = Some(ReviewRules::from(reviews));
        }
        if let Some(restrictions) = &stored.restrictions {
            self.restrictions = Some(PushRestrictions::from(restrictions));
        }

        let toggle = |setting: Option<EnabledSetting>, current: Option<bool>| {
            setting.map(|s| s.enabled).or(current)
        };
        self.required_linear_history =
            toggle(stored.required_linear_history, self.required_linear_history);
        self.allow_force_pushes = toggle(stored.allow_force_pushes, self.allow_force_pushes);
        self.allow_deletions = toggle(stored.allow_deletions, self.allow_deletions);
        self.block_creations = toggle(stored.block_creations, self.block_creations);
        self.required_conversation_resolution = toggle(
            stored.required_conversation_resolution,
            self.required_conversation_resolution,
        );
        self.lock_branch = toggle(stored.lock_branch, self.lock_branch);
        self.allow_fork_syncing = toggle(stored.allow_fork_syncing, self.allow_fork_syncing);

        self
    }

    /// Skeleton merged with whatever was stored before, if anything
    pub fn for_release_branch(stored: Option<&ProtectionSettings>) -> Self {
        match stored {
            Some(stored) => Self::skeleton().merge(stored),
            None => Self::skeleton(),
        }
    }
}
