//! Pull request annotation command implementation

use super::{Command, CommandContext};
use crate::utils::exit_codes::CommandOutcome;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;

/// Adds an issue tracker link to a pull request description
pub struct AddIssueUrlCommand {
    pub pull_request_number: u64,
    pub issue_key: String,
    /// Browse URL of the tracker, the issue key is appended to it
    pub issue_tracker_url: String,
}

impl AddIssueUrlCommand {
    /// Markdown link to the issue, e.g. `Issue: [RO-1](https://tracker/browse/RO-1)`
    pub fn issue_text(&self) -> String {
        format!(
            "Issue: [{key}]({url}{key})",
            key = self.issue_key,
            url = self.issue_tracker_url
        )
    }
}

/// New pull request body with `issue_text` appended, or `None` when the
/// body already contains it
pub fn annotate_body(current: Option<&str>, issue_text: &str) -> Option<String> {
    let current = current.unwrap_or("");

    if current.contains(issue_text) {
        None
    } else if current.is_empty() {
        Some(issue_text.to_string())
    } else {
        Some(format!("{}\n\n{}", current, issue_text))
    }
}

#[async_trait]
impl Command for AddIssueUrlCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        let number = self.pull_request_number;
        let pull_request = context
            .repository
            .get_pull_request(number)
            .await
            .with_context(|| format!("Failed to get pull request #{}", number))?;

        let issue_text = self.issue_text();

        match annotate_body(pull_request.body.as_deref(), &issue_text) {
            None => {
                println!(
                    "{}",
                    "Pull request not updated, it already includes issue reference.".yellow()
                );
            }
            Some(updated_body) => {
                context
                    .logger
                    .debug(format!("Updating body of pull request #{}", number));
                context
                    .repository
                    .update_pull_request_body(number, &updated_body)
                    .await
                    .context("There was a failure updating the pull request.")?;
                println!("{}", "Pull request updated with issue reference.".green());
            }
        }

        Ok(CommandOutcome::Success)
    }
}
