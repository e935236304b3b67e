use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::{aws::RoleAssumer, manager::CredentialManager, prompt::TokenPrompt};

#[derive(Debug, Clone, Args)]
pub struct StatusCommand {
    #[arg(help = "Profile to check (defaults to AWS_PROFILE, then default)")]
    pub profile: Option<String>,
}

impl StatusCommand {
    pub fn execute<A: RoleAssumer, P: TokenPrompt>(
        self,
        manager: &CredentialManager<A, P>,
    ) -> Result<ExitCode> {
        let status = manager.status(self.profile.as_deref());
        debug!("Profile status: {:?}", status);
        Ok(ExitCode::from(status.exit_code()))
    }
}
