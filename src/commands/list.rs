use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::{aws::RoleAssumer, manager::CredentialManager, prompt::TokenPrompt};

#[derive(Debug, Clone, Args)]
pub struct ListCommand {}

impl ListCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        for entry in manager.list() {
            println!("{entry}");
        }
        Ok(ExitCode::SUCCESS)
    }
}

#[derive(Debug, Clone, Args)]
pub struct SessionsCommand {}

impl SessionsCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        for entry in manager.sessions() {
            println!("{entry}");
        }
        Ok(ExitCode::SUCCESS)
    }
}
