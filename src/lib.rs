//! ghutils - GitHub utilities for CI pipelines

pub mod commands;
pub mod constants;
pub mod github;
pub mod logging;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use github::{BranchProtectionGateway, RepoClient, RepositoryApi};
pub use logging::Logger;
pub use utils::CommandOutcome;
