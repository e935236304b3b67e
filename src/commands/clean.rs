use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::{aws::RoleAssumer, manager::CredentialManager, prompt::TokenPrompt};

#[derive(Debug, Clone, Args)]
pub struct CleanCommand {}

impl CleanCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &mut CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        for name in manager.clean()? {
            println!("Removing expired: {name}");
        }
        Ok(ExitCode::SUCCESS)
    }
}
