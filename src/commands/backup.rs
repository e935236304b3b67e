use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::{aws::RoleAssumer, manager::CredentialManager, prompt::TokenPrompt};

#[derive(Debug, Clone, Args)]
pub struct BackupCommand {}

impl BackupCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        let backup_dir = manager.backup().context("Failed to back up AWS files")?;
        println!("Backup: {}", backup_dir.display());
        Ok(ExitCode::SUCCESS)
    }
}
