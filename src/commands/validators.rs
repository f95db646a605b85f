//! Command argument validation utilities
//!
//! This module provides centralized validation logic for command arguments
//! after clap parsing. It handles domain-specific validation rules that
//! go beyond basic argument parsing. `main` reports failures as clap usage
//! errors so they exit with code 2 before any request is sent.

use anyhow::{Result, anyhow};
use std::fs::File;
use std::path::Path;

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Empty collection when at least one item is required
    EmptyCollection { argument: String },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::EmptyCollection { argument } => {
                write!(f, "{} cannot be empty", argument)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

fn invalid(argument: &str, value: &str, reason: &str) -> anyhow::Error {
    validation_error_to_anyhow(CommandValidationError::InvalidValue {
        argument: argument.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

/// Validate a required free-text argument
///
/// Ensures the value is not empty or whitespace only
pub fn validate_non_empty(argument: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(argument, value, "value cannot be empty or whitespace only"));
    }
    Ok(())
}

/// Validate branch name
///
/// Ensures branch names follow Git reference naming rules
pub fn validate_branch_name(argument: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(
            argument,
            name,
            "branch name cannot be empty or whitespace only",
        ));
    }

    let forbidden = |c: char| c.is_whitespace() || c.is_control() || "~^:?*[\\".contains(c);

    if name.starts_with('-')
        || name.starts_with('/')
        || name.ends_with('.')
        || name.ends_with('/')
        || name.ends_with(".lock")
        || name.contains("..")
        || name.contains("//")
        || name.contains("@{")
        || name.chars().any(forbidden)
    {
        return Err(invalid(argument, name, "invalid Git branch name format"));
    }
    Ok(())
}

/// Validate issue labels
///
/// At least one label is required and none may be blank
pub fn validate_labels(labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::EmptyCollection {
                argument: "--label".to_string(),
            },
        ));
    }
    for label in labels {
        if label.trim().is_empty() {
            return Err(invalid(
                "--label",
                label,
                "label cannot be empty or whitespace only",
            ));
        }
    }
    Ok(())
}

/// Validate an issue tracker key such as `RO-1234`
pub fn validate_issue_key(key: &str) -> Result<()> {
    validate_non_empty("--issue-key", key)?;
    if key.chars().any(char::is_whitespace) {
        return Err(invalid("--issue-key", key, "issue key cannot contain whitespace"));
    }
    Ok(())
}

/// Validate pull request number
pub fn validate_pull_request_number(number: u64) -> Result<()> {
    if number == 0 {
        return Err(invalid(
            "--pull-request-number",
            "0",
            "pull request numbers start at 1",
        ));
    }
    Ok(())
}

/// Validate that `path` names a file that can be opened for reading
pub fn validate_readable_file(argument: &str, path: &Path) -> Result<()> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(invalid(argument, &display, "file does not exist"));
    }
    File::open(path).map_err(|e| invalid(argument, &display, &e.to_string()))?;
    Ok(())
}

/// Parse a `true`/`false` flag value, case-insensitively
///
/// Used as a clap value parser so that `True` and `False` keep working.
pub fn parse_bool_flag(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("expected 'true' or 'false', got '{}'", value)),
    }
}
