//! Base types and traits for the command pattern

use crate::github::{BranchProtectionGateway, RepositoryApi};
use crate::logging::Logger;
use crate::utils::exit_codes::CommandOutcome;
use anyhow::Result;

/// Context passed to all commands
pub struct CommandContext<'a> {
    /// Typed GitHub calls scoped to the target repository
    pub repository: &'a dyn RepositoryApi,
    /// Raw access to the branch protection API of the same repository
    pub protection: BranchProtectionGateway<'a>,
    pub logger: &'a Logger,
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    ///
    /// Errors are unclassified failures; anything a command wants to map to
    /// a specific exit code is returned as a [`CommandOutcome`] instead.
    async fn execute(&self, context: &CommandContext<'_>) -> Result<CommandOutcome>;
}
