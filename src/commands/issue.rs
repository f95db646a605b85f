//! Create issue command implementation

use super::{Command, CommandContext};
use crate::constants::issues::BUILD_FAILURE_TITLE_PREFIX;
use crate::utils::exit_codes::CommandOutcome;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use ghutils_github::NewIssue;

/// Files an issue for a failed CI build
pub struct CreateIssueCommand {
    pub tag: String,
    pub link: String,
    pub labels: Vec<String>,
}

impl CreateIssueCommand {
    pub fn issue(&self) -> NewIssue {
        NewIssue {
            title: format!("{}{}", BUILD_FAILURE_TITLE_PREFIX, self.tag),
            body: format!("[link to failing build]({})", self.link),
            labels: self.labels.clone(),
        }
    }
}

#[async_trait]
impl Command for CreateIssueCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        let issue = self.issue();
        context.logger.debug(format!(
            "Creating issue '{}' in {} with labels {:?}",
            issue.title,
            context.repository.handle(),
            issue.labels
        ));

        let created = context
            .repository
            .create_issue(&issue)
            .await
            .context("Failed to create issue")?;

        println!(
            "{} {}",
            format!("Created issue #{}:", created.number).green(),
            created.html_url
        );
        Ok(CommandOutcome::Success)
    }
}
