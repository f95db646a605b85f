//! Command implementations, one per CLI subcommand

pub mod base;
pub mod issue;
pub mod pr;
pub mod protection;
pub mod rc_branch;
pub mod release;
pub mod validators;

pub use base::{Command, CommandContext};
pub use issue::CreateIssueCommand;
pub use pr::AddIssueUrlCommand;
pub use protection::{
    GetAdminEnforcementCommand, GetBranchProtectionCommand, SetAdminEnforcementCommand,
};
pub use rc_branch::UpdateRcBranchCommand;
pub use release::CreateReleaseCommand;
