use std::{env, path::PathBuf};

use crate::{
    constants::{
        AWS_CONFIG_DIR_NAME, AWS_CONFIG_FILE_NAME, AWS_CREDENTIALS_FILE_NAME, DEFAULT_AWS_REGION,
        DEFAULT_PROFILE, ENV_CONFIG_FILE, ENV_CREDENTIALS_FILE, ENV_DEFAULT_REGION, ENV_PROFILE,
    },
    error::{Error, Result},
};

/// Process-wide settings, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub credentials_path: PathBuf,
    pub config_path: PathBuf,
    /// Value of `AWS_DEFAULT_REGION`, if set, even when empty
    pub default_region: Option<String>,
    /// Value of `AWS_PROFILE`, if set, even when empty
    pub active_profile: Option<String>,
    /// Directory under which `backup` creates its timestamped folders
    pub backup_root: PathBuf,
}

impl Settings {
    /// Resolve settings from the environment.
    ///
    /// `AWS_SHARED_CREDENTIALS_FILE` and `AWS_CONFIG_FILE` override the
    /// default locations under `~/.aws`.
    pub fn from_env() -> Result<Self> {
        let aws_dir = dirs::home_dir()
            .or_else(|| {
                env::var("HOME")
                    .or_else(|_| env::var("USERPROFILE"))
                    .ok()
                    .map(PathBuf::from)
            })
            .map(|home| home.join(AWS_CONFIG_DIR_NAME))
            .ok_or(Error::HomeDirectory)?;

        Ok(Self {
            credentials_path: env_path(ENV_CREDENTIALS_FILE)
                .unwrap_or_else(|| aws_dir.join(AWS_CREDENTIALS_FILE_NAME)),
            config_path: env_path(ENV_CONFIG_FILE)
                .unwrap_or_else(|| aws_dir.join(AWS_CONFIG_FILE_NAME)),
            default_region: env::var(ENV_DEFAULT_REGION).ok(),
            active_profile: env::var(ENV_PROFILE).ok(),
            backup_root: aws_dir,
        })
    }

    /// Region used when a role profile does not configure one
    pub fn fallback_region(&self) -> &str {
        self.default_region.as_deref().unwrap_or(DEFAULT_AWS_REGION)
    }

    /// Explicit profile, else `AWS_PROFILE`, else `default`
    pub fn resolve_profile(&self, profile: Option<&str>) -> String {
        profile
            .or(self.active_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
            .to_string()
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
