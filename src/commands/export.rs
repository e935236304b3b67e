use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Result;
use clap::Args;

use crate::{
    aws::RoleAssumer, error::ErrorKind, manager::CredentialManager, prompt::TokenPrompt,
};

#[derive(Debug, Clone, Args)]
pub struct ExportCommand {
    #[arg(help = "Profile to export (defaults to AWS_PROFILE, then default)")]
    pub profile: Option<String>,
}

impl ExportCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        self.write_to(manager, &mut io::stdout())
    }

    /// Print the export statements, or a not-found line with a failing exit code
    fn write_to<A: RoleAssumer, P: TokenPrompt>(
        &self,
        manager: &CredentialManager<A, P>,
        out: &mut dyn Write,
    ) -> Result<ExitCode> {
        match manager.export(self.profile.as_deref()) {
            Ok(statements) => {
                for line in statements.lines() {
                    writeln!(out, "{line}")?;
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                writeln!(out, "{e}")?;
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        }
    }
}
