//! Release candidate branch reset
//!
//! Recreates the release candidate (RC) branch at the tip of a mainline
//! branch. GitHub refuses to delete a protected branch, so protection is
//! read, removed, and re-applied around the delete/create:
//!
//! 1. look up the RC branch
//! 2. if it exists, read its protection (404 means none) and remove it
//! 3. delete the RC branch
//! 4. read the mainline tip
//! 5. create the RC branch at that tip
//! 6. build the protection payload from the skeleton and stored settings
//! 7. apply protection
//! 8. check the RC branch still points at the tip read in step 4
//!
//! The sequence is not atomic. Step 8 detects another actor moving the
//! branch in the meantime but cannot prevent it.

use super::{Command, CommandContext};
use crate::github::{BranchProtectionGateway, ProtectionPayload, ProtectionSettings, RepositoryApi};
use crate::logging::Logger;
use crate::utils::exit_codes::CommandOutcome;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use ghutils_github::{GitHubError, RawResponse};
use thiserror::Error;

/// Why a reset stopped before completing
#[derive(Debug, Error)]
pub enum ResetFailure {
    #[error("Failed to look up branch {branch}: {source}")]
    BranchLookup {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("Failed to read branch protection of {branch}: {source}")]
    ProtectionLookup {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("Failed to disable branch protection of {branch}: {source}")]
    DisableProtection {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("Failed to delete branch {branch}: {source}")]
    DeleteBranch {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("Mainline branch {branch} does not exist")]
    MainlineMissing { branch: String },

    #[error("Failed to create branch {branch} at {sha}: {source}")]
    CreateBranch {
        branch: String,
        sha: String,
        #[source]
        source: GitHubError,
    },

    #[error("Failed to apply branch protection to {branch}: {source}")]
    ApplyProtection {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error(
        "Branch {branch} was modified during the reset: expected {expected}, found {}",
        .actual.as_deref().unwrap_or("no branch")
    )]
    ShaMismatch {
        branch: String,
        expected: String,
        actual: Option<String>,
    },
}

/// What a completed reset did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    pub branch: String,
    /// Mainline SHA the branch now points at
    pub sha: String,
    /// The branch existed before the reset
    pub existed: bool,
    /// The branch existed but had no protection
    pub was_unprotected: bool,
    /// Protection that was applied
    pub payload: ProtectionPayload,
}

/// Protection state of an existing branch
#[derive(Debug)]
enum ExistingProtection {
    Protected(ProtectionSettings),
    Unprotected,
}

/// Map the result of a reset to the command's exit code
pub fn finalize(result: &std::result::Result<ResetReport, ResetFailure>) -> CommandOutcome {
    match result {
        Ok(report) if report.was_unprotected => CommandOutcome::RcBranchUnprotected,
        Ok(_) => CommandOutcome::Success,
        Err(_) => CommandOutcome::Failure,
    }
}

/// One run of the reset procedure
pub struct RcBranchReset<'a> {
    repository: &'a dyn RepositoryApi,
    protection: &'a BranchProtectionGateway<'a>,
    logger: &'a Logger,
    mainline: &'a str,
    rc: &'a str,
}

impl<'a> RcBranchReset<'a> {
    pub fn new(context: &'a CommandContext<'a>, mainline: &'a str, rc: &'a str) -> Self {
        Self {
            repository: context.repository,
            protection: &context.protection,
            logger: context.logger,
            mainline,
            rc,
        }
    }

    pub async fn run(&self) -> std::result::Result<ResetReport, ResetFailure> {
        let existing_sha = self
            .repository
            .branch_sha(self.rc)
            .await
            .map_err(|source| ResetFailure::BranchLookup {
                branch: self.rc.to_string(),
                source,
            })?;

        let mut stored = None;
        let mut was_unprotected = false;

        if let Some(sha) = &existing_sha {
            self.logger
                .debug(format!("Branch {} exists at {}", self.rc, sha));

            match self.existing_protection().await? {
                ExistingProtection::Protected(settings) => {
                    self.disable_protection().await?;
                    stored = Some(settings);
                }
                ExistingProtection::Unprotected => {
                    self.logger.warn(format!(
                        "Branch {} exists but is not protected, protection will be added",
                        self.rc
                    ));
                    was_unprotected = true;
                }
            }

            self.repository
                .delete_branch(self.rc)
                .await
                .map_err(|source| ResetFailure::DeleteBranch {
                    branch: self.rc.to_string(),
                    source,
                })?;
            self.logger.info(format!("Deleted branch {}", self.rc));
        } else {
            self.logger
                .info(format!("Branch {} does not exist, creating it", self.rc));
        }

        let mainline_sha = self.mainline_sha().await?;

        self.repository
            .create_branch(self.rc, &mainline_sha)
            .await
            .map_err(|source| ResetFailure::CreateBranch {
                branch: self.rc.to_string(),
                sha: mainline_sha.clone(),
                source,
            })?;
        self.logger.info(format!(
            "Created branch {} from {} at {}",
            self.rc, self.mainline, mainline_sha
        ));

        let payload = ProtectionPayload::for_release_branch(stored.as_ref());
        self.protection
            .apply(self.rc, &payload)
            .await
            .and_then(RawResponse::error_for_status)
            .map_err(|source| ResetFailure::ApplyProtection {
                branch: self.rc.to_string(),
                source,
            })?;
        self.logger
            .info(format!("Applied branch protection to {}", self.rc));

        self.verify(&mainline_sha).await?;

        Ok(ResetReport {
            branch: self.rc.to_string(),
            sha: mainline_sha,
            existed: existing_sha.is_some(),
            was_unprotected,
            payload,
        })
    }

    async fn existing_protection(&self) -> std::result::Result<ExistingProtection, ResetFailure> {
        let lookup_failed = |source: GitHubError| ResetFailure::ProtectionLookup {
            branch: self.rc.to_string(),
            source,
        };

        let response = self.protection.get(self.rc).await.map_err(lookup_failed)?;

        match response.status {
            200 => {
                let settings = response.json().map_err(lookup_failed)?;
                Ok(ExistingProtection::Protected(settings))
            }
            404 => Ok(ExistingProtection::Unprotected),
            status => Err(lookup_failed(GitHubError::from_response(
                status,
                &response.body,
            ))),
        }
    }

    async fn disable_protection(&self) -> std::result::Result<(), ResetFailure> {
        self.protection
            .remove(self.rc)
            .await
            .and_then(RawResponse::error_for_status)
            .map_err(|source| ResetFailure::DisableProtection {
                branch: self.rc.to_string(),
                source,
            })?;
        self.logger
            .debug(format!("Disabled branch protection on {}", self.rc));
        Ok(())
    }

    async fn mainline_sha(&self) -> std::result::Result<String, ResetFailure> {
        self.repository
            .branch_sha(self.mainline)
            .await
            .map_err(|source| ResetFailure::BranchLookup {
                branch: self.mainline.to_string(),
                source,
            })?
            .ok_or_else(|| ResetFailure::MainlineMissing {
                branch: self.mainline.to_string(),
            })
    }

    async fn verify(&self, expected: &str) -> std::result::Result<(), ResetFailure> {
        let actual = self
            .repository
            .branch_sha(self.rc)
            .await
            .map_err(|source| ResetFailure::BranchLookup {
                branch: self.rc.to_string(),
                source,
            })?;

        if actual.as_deref() == Some(expected) {
            Ok(())
        } else {
            Err(ResetFailure::ShaMismatch {
                branch: self.rc.to_string(),
                expected: expected.to_string(),
                actual,
            })
        }
    }
}

/// `update-rc-branch` command
pub struct UpdateRcBranchCommand {
    pub mainline: String,
    pub rc: String,
}

#[async_trait]
impl Command for UpdateRcBranchCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        let result = RcBranchReset::new(context, &self.mainline, &self.rc)
            .run()
            .await;

        match &result {
            Ok(report) => {
                println!(
                    "{}",
                    format!("Branch {} now points at {}", report.branch, report.sha).green()
                );
                if report.was_unprotected {
                    println!(
                        "{}",
                        format!("Branch {} was not protected before the reset", report.branch)
                            .yellow()
                    );
                }
            }
            Err(failure) => {
                eprintln!("{}", failure.to_string().red());
            }
        }

        let outcome = finalize(&result);
        context.logger.debug(format!(
            "update-rc-branch finished: {} ({})",
            outcome.code(),
            outcome.description()
        ));
        Ok(outcome)
    }
}
