//! Exit code utilities and mappings
//!
//! Codes are scoped per command: `5` means "release candidate branch was
//! unprotected" for `update-rc-branch` and "tag already exists" for
//! `create-release`. Usage errors (`2`) are reported by clap before any
//! command runs.

use std::process::ExitCode;

pub const SUCCESS: u8 = 0;
pub const FAILURE: u8 = 1;

/// Final state of a command, mapped to a process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// A failure the command already reported to the operator
    Failure,
    /// `update-rc-branch`: the branch existed without protection
    RcBranchUnprotected,
    /// `create-release`: a release for the tag already exists (HTTP 422)
    ReleaseTagExists,
    /// `create-release`: the token cannot create releases here (HTTP 404)
    ReleasePermissionDenied,
}

impl CommandOutcome {
    pub fn code(self) -> u8 {
        match self {
            CommandOutcome::Success => SUCCESS,
            CommandOutcome::Failure => FAILURE,
            CommandOutcome::RcBranchUnprotected => 5,
            CommandOutcome::ReleaseTagExists => 5,
            CommandOutcome::ReleasePermissionDenied => 6,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandOutcome::Success => "success",
            CommandOutcome::Failure => "general error",
            CommandOutcome::RcBranchUnprotected => "release candidate branch was not protected",
            CommandOutcome::ReleaseTagExists => "release tag already exists",
            CommandOutcome::ReleasePermissionDenied => {
                "repository not found or insufficient permissions"
            }
        }
    }
}

impl From<CommandOutcome> for ExitCode {
    fn from(outcome: CommandOutcome) -> Self {
        ExitCode::from(outcome.code())
    }
}
