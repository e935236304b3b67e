use std::io;

use dialoguer::{Input, theme::ColorfulTheme};
use tracing::debug;

use crate::error::{Error, Result};

/// Source of MFA codes.
///
/// `Ok(None)` means the user cancelled; callers stop quietly.
pub trait TokenPrompt {
    fn mfa_token(&self, mfa_serial: &str) -> Result<Option<String>>;
}

/// Reads the code from the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl TokenPrompt for TerminalPrompt {
    fn mfa_token(&self, mfa_serial: &str) -> Result<Option<String>> {
        debug!("Prompting for MFA token of {}", mfa_serial);

        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("MFA Token")
            .interact_text()
            .map_err(|dialoguer::Error::IO(e)| e);

        match answer {
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                debug!("MFA prompt interrupted");
                Ok(None)
            }
            Err(e) => Err(Error::Prompt(e)),
        }
    }
}
