use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};

use crate::{
    aws::StsRoleAssumer,
    commands::{
        AssumeCommand, BackupCommand, CleanCommand, CompletionsCommand, ExportCommand,
        ListCommand, RolesCommand, SessionsCommand, StatusCommand,
    },
    config::Settings,
    manager::CredentialManager,
    prompt::TerminalPrompt,
};

/// Manager wired to AWS STS and the terminal
pub type Manager = CredentialManager<StsRoleAssumer, TerminalPrompt>;

#[derive(Debug, Clone, Parser)]
#[command(name = "awstemp", version, about = "Assume AWS IAM roles into temporary profiles", long_about = None)]
pub struct Cli {
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Assumes an AWS IAM role")]
    Assume(AssumeCommand),
    #[command(about = "Creates a backup of the credentials and config files")]
    Backup(BackupCommand),
    #[command(about = "Cleans up expired session profiles")]
    Clean(CleanCommand),
    #[command(about = "Exports the access keys to stdout")]
    Export(ExportCommand),
    #[command(about = "Lists the profiles available")]
    List(ListCommand),
    #[command(about = "Lists the roles that can be assumed")]
    Roles(RolesCommand),
    #[command(about = "Lists the session profiles and their TTL")]
    Sessions(SessionsCommand),
    #[command(about = "Checks the status of the current profile")]
    Status(StatusCommand),
    #[command(about = "Generate shell completion scripts for awstemp")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<ExitCode> {
        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(ExitCode::FAILURE);
        };

        match command {
            Commands::Assume(cmd) => cmd.execute(&mut load_manager()?).await,
            Commands::Backup(cmd) => cmd.execute(&load_manager()?),
            Commands::Clean(cmd) => cmd.execute(&mut load_manager()?),
            Commands::Export(cmd) => cmd.execute(&load_manager()?),
            Commands::List(cmd) => cmd.execute(&load_manager()?),
            Commands::Roles(cmd) => cmd.execute(&load_manager()?),
            Commands::Sessions(cmd) => cmd.execute(&load_manager()?),
            Commands::Status(cmd) => cmd.execute(&load_manager()?),
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_manager() -> Result<Manager> {
    let settings = Settings::from_env().context("Failed to resolve AWS file locations")?;
    let assumer = StsRoleAssumer::new(settings.fallback_region());

    CredentialManager::load(settings, assumer, TerminalPrompt)
        .context("Failed to load AWS config files")
}
