use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::{aws::RoleAssumer, manager::CredentialManager, prompt::TokenPrompt};

#[derive(Debug, Clone, Args)]
pub struct RolesCommand {}

impl RolesCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        for role in manager.roles() {
            println!("{role}");
        }
        Ok(ExitCode::SUCCESS)
    }
}
