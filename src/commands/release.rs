//! Create release command implementation

use super::{Command, CommandContext};
use crate::utils::exit_codes::CommandOutcome;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use ghutils_github::{GitHubError, NewRelease};
use std::fs;
use std::path::PathBuf;

/// Publishes a release for `version` at `reference`
pub struct CreateReleaseCommand {
    pub version: String,
    pub reference: String,
    /// File holding the release notes
    pub body_path: PathBuf,
}

/// Exit outcome for release failures that have one; `None` for the rest
pub fn classify_release_error(error: &GitHubError) -> Option<CommandOutcome> {
    match error.status() {
        Some(422) => Some(CommandOutcome::ReleaseTagExists),
        Some(404) => Some(CommandOutcome::ReleasePermissionDenied),
        _ => None,
    }
}

#[async_trait]
impl Command for CreateReleaseCommand {
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome> {
        let body = fs::read_to_string(&self.body_path).with_context(|| {
            format!(
                "Failed to read release notes from {}",
                self.body_path.display()
            )
        })?;

        let release = NewRelease::new(&self.version, &self.reference, body);
        context.logger.debug(format!(
            "Creating release {} at {} in {}",
            release.tag_name,
            release.target_commitish,
            context.repository.handle()
        ));

        match context.repository.create_release(&release).await {
            Ok(created) => {
                println!(
                    "{} {}",
                    format!("Created release {}:", created.tag_name).green(),
                    created.html_url
                );
                Ok(CommandOutcome::Success)
            }
            Err(error) => match classify_release_error(&error) {
                Some(outcome) => {
                    eprintln!(
                        "{}",
                        format!(
                            "Failed to create release {}: {} ({})",
                            self.version,
                            outcome.description(),
                            error
                        )
                        .red()
                    );
                    Ok(outcome)
                }
                None => Err(error).context(format!("Failed to create release {}", self.version)),
            },
        }
    }
}
