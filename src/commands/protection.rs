//! Branch protection inspection and admin enforcement commands

use super::{Command, CommandContext};
use crate::utils::exit_codes::CommandOutcome;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use ghutils_github::{GitHubError, Method, RawResponse};
use serde_json::Value;

fn pretty_json(response: &RawResponse) -> Result<String> {
    let value: Value = response
        .json()
        .context("Branch protection response was not valid JSON")?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Report whether `branch` is protected, printing the settings when it is
///
/// A 404 means the branch has no protection; any status other than 200 or
/// 404 is an error.
pub async fn show_branch_protection(context: &CommandContext<'_>, branch: &str) -> Result<bool> {
    let response = context
        .protection
        .get(branch)
        .await
        .with_context(|| format!("Failed to query branch protection of {}", branch))?;

    match response.status {
        200 => {
            println!("{}", "Branch Protection Enabled".green());
            println!("{}", pretty_json(&response)?);
            Ok(true)
        }
        404 => {
            println!("{}", "Branch Protection Disabled".yellow());
            Ok(false)
        }
        status => Err(GitHubError::from_response(status, &response.body))
            .with_context(|| format!("Failed to query branch protection of {}", branch)),
    }
}

/// Print the admin enforcement document of `branch`
pub async fn show_admin_enforcement(context: &CommandContext<'_>, branch: &str) -> Result<()> {
    let response = context
        .protection
        .admin_enforcement(branch, Method::GET)
        .await
        .and_then(RawResponse::error_for_status)
        .with_context(|| format!("Failed to query admin enforcement of {}", branch))?;

    println!("{}", pretty_json(&response)?);
    Ok(())
}

/// `get-branch-protection` command
pub struct GetBranchProtectionCommand {
    pub branch: String,
}

#[async_trait]
impl Command for GetBranchProtectionCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        show_branch_protection(context, &self.branch).await?;
        Ok(CommandOutcome::Success)
    }
}

/// `get-admin-enforcement` command
pub struct GetAdminEnforcementCommand {
    pub branch: String,
}

#[async_trait]
impl Command for GetAdminEnforcementCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        show_admin_enforcement(context, &self.branch).await?;
        Ok(CommandOutcome::Success)
    }
}

/// `set-admin-enforcement` command
///
/// Only touches branches that are already protected; GitHub would otherwise
/// reject the request.
pub struct SetAdminEnforcementCommand {
    pub branch: String,
    pub enabled: bool,
}

impl SetAdminEnforcementCommand {
    pub fn method(&self) -> Method {
        if self.enabled {
            Method::POST
        } else {
            Method::DELETE
        }
    }
}

#[async_trait]
impl Command for SetAdminEnforcementCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        if !show_branch_protection(context, &self.branch).await? {
            println!("Not modifying branch protection admin enforcement");
            return Ok(CommandOutcome::Success);
        }

        println!(
            "Setting branch protection admin enforcement to {}",
            self.enabled
        );
        context
            .protection
            .admin_enforcement(&self.branch, self.method())
            .await
            .and_then(RawResponse::error_for_status)
            .with_context(|| format!("Failed to set admin enforcement of {}", self.branch))?;

        show_admin_enforcement(context, &self.branch).await?;
        Ok(CommandOutcome::Success)
    }
}
