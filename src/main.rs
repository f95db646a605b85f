use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::*;
use ghutils::commands::validators;
use ghutils::commands::*;
use ghutils::utils::exit_codes;
use ghutils::{BranchProtectionGateway, Logger, RepoClient, RepositoryApi, constants};
use ghutils_github::{GitHubClient, RepoHandle};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::instrument::WithSubscriber;

#[derive(Parser)]
#[command(name = "ghutils")]
#[command(about = "GitHub utilities for CI pipelines")]
#[command(version)]
struct Cli {
    /// GitHub organisation that owns the target repository
    #[arg(long)]
    org: String,

    /// Name of the target repository
    #[arg(long)]
    repo: String,

    /// GitHub personal access token
    #[arg(long)]
    pat: String,

    /// Enable debug logging (the token is never logged)
    #[arg(long)]
    debug: bool,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long, default_value_t = constants::github::API_BASE.to_string())]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// File an issue for a failed build
    CreateIssue {
        /// CI build tag
        #[arg(long)]
        tag: String,

        /// Link to the build in the CI UI
        #[arg(long)]
        link: String,

        /// Label to add to the issue (can be specified multiple times)
        #[arg(long = "label", required = true)]
        labels: Vec<String>,
    },

    /// Link a pull request to the issue it resolves
    AddIssueUrlToPr {
        /// Pull request to update
        #[arg(long)]
        pull_request_number: u64,

        /// Issue being resolved by the pull request
        #[arg(long)]
        issue_key: String,

        /// Issue tracker browse URL the key is appended to
        #[arg(long, default_value_t = constants::issues::DEFAULT_ISSUE_TRACKER_URL.to_string())]
        issue_tracker_url: String,
    },

    /// Recreate the release candidate branch from the mainline branch
    UpdateRcBranch {
        /// Branch the release candidate is cut from
        #[arg(long)]
        mainline: String,

        /// Release candidate branch to recreate
        #[arg(long)]
        rc: String,
    },

    /// Create a release
    CreateRelease {
        /// Version, used as tag and release name
        #[arg(long)]
        version: String,

        /// Branch or commit SHA to tag
        #[arg(long = "ref")]
        reference: String,

        /// File containing the release notes
        #[arg(long)]
        body: PathBuf,
    },

    /// Show the admin enforcement setting of a branch
    GetAdminEnforcement {
        /// Branch to query
        #[arg(long)]
        branch: String,
    },

    /// Enable or disable admin enforcement on a protected branch
    SetAdminEnforcement {
        /// Branch to modify
        #[arg(long)]
        branch: String,

        /// Whether protection rules also apply to administrators (true/false)
        #[arg(
            long,
            required = true,
            action = clap::ArgAction::Set,
            value_parser = validators::parse_bool_flag
        )]
        admin_enforcement_enabled: bool,
    },

    /// Show the branch protection settings of a branch
    GetBranchProtection {
        /// Branch to query
        #[arg(long)]
        branch: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = validate(&cli) {
        Cli::command()
            .error(ErrorKind::ValueValidation, e.to_string())
            .exit();
    }

    let logger = Logger::new(cli.debug);
    let repo = RepoHandle::new(&cli.org, &cli.repo);
    let client = GitHubClient::new(cli.pat.as_str()).with_api_base(cli.api_url.as_str());
    let repository = RepoClient::new(client, repo.clone());

    let context = CommandContext {
        repository: &repository,
        protection: BranchProtectionGateway::new(repository.client(), &cli.api_url, repo),
        logger: &logger,
    };

    logger.debug(format!(
        "Using repository {} via {}",
        repository.handle(),
        repository.client().api_base()
    ));

    let command = build_command(cli.command);
    let result = command
        .execute(&context)
        .with_subscriber(logger.dispatch().clone())
        .await;

    match result {
        Ok(outcome) => {
            logger.debug(format!(
                "Exiting with code {} ({})",
                outcome.code(),
                outcome.description()
            ));
            outcome.into()
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}

/// Domain checks clap cannot express; failures are usage errors
fn validate(cli: &Cli) -> Result<()> {
    validators::validate_non_empty("--org", &cli.org)?;
    validators::validate_non_empty("--repo", &cli.repo)?;
    validators::validate_non_empty("--pat", &cli.pat)?;
    if !cli.api_url.starts_with("https://") && !cli.api_url.starts_with("http://") {
        anyhow::bail!(
            "Invalid value '{}' for --api-url: expected an http(s) URL",
            cli.api_url
        );
    }

    match &cli.command {
        Commands::CreateIssue { tag, link, labels } => {
            validators::validate_non_empty("--tag", tag)?;
            validators::validate_non_empty("--link", link)?;
            validators::validate_labels(labels)?;
        }
        Commands::AddIssueUrlToPr {
            pull_request_number,
            issue_key,
            issue_tracker_url,
        } => {
            validators::validate_pull_request_number(*pull_request_number)?;
            validators::validate_issue_key(issue_key)?;
            validators::validate_non_empty("--issue-tracker-url", issue_tracker_url)?;
        }
        Commands::UpdateRcBranch { mainline, rc } => {
            validators::validate_branch_name("--mainline", mainline)?;
            validators::validate_branch_name("--rc", rc)?;
            if mainline == rc {
                anyhow::bail!("--mainline and --rc must name different branches");
            }
        }
        Commands::CreateRelease {
            version,
            reference,
            body,
        } => {
            validators::validate_non_empty("--version", version)?;
            validators::validate_non_empty("--ref", reference)?;
            validators::validate_readable_file("--body", body)?;
        }
        Commands::GetAdminEnforcement { branch }
        | Commands::SetAdminEnforcement { branch, .. }
        | Commands::GetBranchProtection { branch } => {
            validators::validate_branch_name("--branch", branch)?;
        }
    }

    Ok(())
}

fn build_command(command: Commands) -> Box<dyn Command + Send + Sync> {
    match command {
        Commands::CreateIssue { tag, link, labels } => {
            Box::new(CreateIssueCommand { tag, link, labels })
        }
        Commands::AddIssueUrlToPr {
            pull_request_number,
            issue_key,
            issue_tracker_url,
        } => Box::new(AddIssueUrlCommand {
            pull_request_number,
            issue_key,
            issue_tracker_url,
        }),
        Commands::UpdateRcBranch { mainline, rc } => {
            Box::new(UpdateRcBranchCommand { mainline, rc })
        }
        Commands::CreateRelease {
            version,
            reference,
            body,
        } => Box::new(CreateReleaseCommand {
            version,
            reference,
            body_path: body,
        }),
        Commands::GetAdminEnforcement { branch } => Box::new(GetAdminEnforcementCommand { branch }),
        Commands::SetAdminEnforcement {
            branch,
            admin_enforcement_enabled,
        } => Box::new(SetAdminEnforcementCommand {
            branch,
            enabled: admin_enforcement_enabled,
        }),
        Commands::GetBranchProtection { branch } => Box::new(GetBranchProtectionCommand { branch }),
    }
}
