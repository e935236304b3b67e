use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::{
    aws::RoleAssumer,
    constants::temp_alias,
    manager::{AssumeOutcome, CredentialManager},
    prompt::TokenPrompt,
};

#[derive(Debug, Clone, Args)]
pub struct AssumeCommand {
    #[arg(help = "Role to assume")]
    pub role: String,

    #[arg(help = "Alias to name the temporary profile")]
    pub alias: Option<String>,
}

impl AssumeCommand {
    pub async fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &mut CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        self.write_to(manager, &mut io::stdout()).await
    }

    async fn write_to<A: RoleAssumer, P: TokenPrompt>(
        &self,
        manager: &mut CredentialManager<A, P>,
        out: &mut dyn Write,
    ) -> Result<ExitCode> {
        let alias = self
            .alias
            .clone()
            .unwrap_or_else(|| temp_alias(&self.role));

        if manager.is_expired(&alias) {
            writeln!(out, "Assuming role: {} as {}", self.role, alias)?;
        }

        match manager.assume(&self.role, Some(&alias)).await? {
            AssumeOutcome::Created => {
                writeln!(
                    out,
                    "Session credentials created as temporary profile: {alias}"
                )?;
            }
            AssumeOutcome::Skipped => info!("Temporary profile {} is still valid", alias),
            AssumeOutcome::Cancelled => info!("Cancelled"),
        }

        Ok(ExitCode::SUCCESS)
    }
}
