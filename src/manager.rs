use std::{fs, path::PathBuf};

use chrono::{Local, Utc};
use tracing::{debug, info, warn};

use crate::{
    annotate,
    aws::{AssumeRoleRequest, MfaToken, RoleAssumer},
    config::Settings,
    constants::{
        AWS_CONFIG_FILE_NAME, AWS_CREDENTIALS_FILE_NAME, DEFAULT_PROFILE, KEY_ACCESS_KEY_ID,
        KEY_EXPIRATION, KEY_REGION, KEY_SECRET_ACCESS_KEY, KEY_SESSION_TOKEN, config_section_name,
        temp_alias,
    },
    error::{Error, Result},
    expiry::{self, format_expiration},
    profile::{self, RoleProfile},
    prompt::TokenPrompt,
    session::{self, SessionEntry},
    store::IniStore,
};

/// Result of [`CredentialManager::assume`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssumeOutcome {
    /// The alias still holds valid credentials; nothing was done
    Skipped,
    /// Fresh credentials were stored under the alias
    Created,
    /// The user aborted the MFA prompt
    Cancelled,
}

/// Result of [`CredentialManager::status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    Valid,
    Expired,
}

impl ProfileStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Expired => 1,
        }
    }
}

/// Keys of one profile, ready to be evaluated by a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatements {
    pub profile: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl ExportStatements {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Profile: {}", self.profile),
            format!("export AWS_ACCESS_KEY_ID={}", self.access_key_id),
            format!("export AWS_SECRET_ACCESS_KEY={}", self.secret_access_key),
        ];
        if let Some(token) = &self.session_token {
            lines.push(format!("export AWS_SESSION_TOKEN={token}"));
        }
        lines
    }
}

/// Owns both stores for the lifetime of one invocation.
///
/// The files are read once in [`CredentialManager::load`] and written back
/// only by [`assume`](Self::assume) and [`clean`](Self::clean).
pub struct CredentialManager<A, P> {
    settings: Settings,
    config: IniStore,
    credentials: IniStore,
    assumer: A,
    prompt: P,
}

impl<A: RoleAssumer, P: TokenPrompt> CredentialManager<A, P> {
    pub fn load(settings: Settings, assumer: A, prompt: P) -> Result<Self> {
        debug!("Loading config from {}", settings.config_path.display());
        let config = IniStore::load(&settings.config_path)?;

        debug!(
            "Loading credentials from {}",
            settings.credentials_path.display()
        );
        let credentials = IniStore::load(&settings.credentials_path)?.private();

        Ok(Self {
            settings,
            config,
            credentials,
            assumer,
            prompt,
        })
    }

    pub fn config(&self) -> &IniStore {
        &self.config
    }

    pub fn credentials(&self) -> &IniStore {
        &self.credentials
    }

    pub fn is_expired(&self, alias: &str) -> bool {
        expiry::is_expired(&self.credentials, alias, Utc::now())
    }

    /// Assume `role` and cache its credentials under `alias` (`<role>_temp`
    /// by default), unless the alias still holds a valid session.
    pub async fn assume(&mut self, role: &str, alias: Option<&str>) -> Result<AssumeOutcome> {
        let alias = alias.map_or_else(|| temp_alias(role), String::from);

        if !self.is_expired(&alias) {
            info!("Profile {} is still valid, skipping", alias);
            return Ok(AssumeOutcome::Skipped);
        }

        let profile = RoleProfile::resolve(&self.config, role, &self.settings)?;
        info!("Assuming role: {} as {}", role, alias);

        // Second granularity: two calls in the same second share a name
        let session_name = format!("{}-{}", role, Utc::now().timestamp());

        let mfa = match &profile.mfa_serial {
            Some(serial) => match self.prompt.mfa_token(serial)? {
                Some(code) => Some(MfaToken {
                    serial: serial.clone(),
                    code,
                }),
                None => return Ok(AssumeOutcome::Cancelled),
            },
            None => None,
        };

        let request = AssumeRoleRequest {
            role_arn: profile.role_arn.clone(),
            session_name,
            source_profile: profile.source_profile.clone(),
            mfa,
        };

        let credentials = self
            .assumer
            .assume_role(&request)
            .await
            .map_err(Error::Provider)?;

        let config_section = config_section_name(&alias);
        if !self.config.has_section(&config_section) && !profile.region.is_empty() {
            self.config.set(&config_section, KEY_REGION, &profile.region);
        }

        self.credentials.add_section(&alias);
        self.credentials
            .set(&alias, KEY_ACCESS_KEY_ID, &credentials.access_key_id);
        self.credentials
            .set(&alias, KEY_SECRET_ACCESS_KEY, &credentials.secret_access_key);
        self.credentials
            .set(&alias, KEY_SESSION_TOKEN, &credentials.session_token);
        self.credentials.set(
            &alias,
            KEY_EXPIRATION,
            &format_expiration(&credentials.expiration),
        );

        self.persist()?;

        info!("Session credentials created as temporary profile: {}", alias);
        Ok(AssumeOutcome::Created)
    }

    /// Drop every expired credentials section together with its config
    /// profile, then rewrite both files. Returns the removed names.
    pub fn clean(&mut self) -> Result<Vec<String>> {
        let now = Utc::now();
        let expired: Vec<String> = self
            .credentials
            .sections()
            .into_iter()
            .filter(|name| *name != DEFAULT_PROFILE)
            .filter(|name| expiry::is_expired(&self.credentials, name, now))
            .map(String::from)
            .collect();

        for name in &expired {
            info!("Removing expired: {}", name);
            self.credentials.remove_section(name);
            self.config.remove_section(&config_section_name(name));
        }

        self.persist()?;
        Ok(expired)
    }

    /// Export statements for `profile`, `AWS_PROFILE`, or `default`
    pub fn export(&self, profile: Option<&str>) -> Result<ExportStatements> {
        let profile = self.settings.resolve_profile(profile);

        let section = self
            .credentials
            .section(&profile)
            .ok_or_else(|| Error::ProfileNotFound(profile.clone()))?;

        let required = |key: &'static str| {
            section
                .get(key)
                .map(String::from)
                .ok_or_else(|| Error::MissingKey {
                    profile: profile.clone(),
                    key,
                })
        };

        Ok(ExportStatements {
            access_key_id: required(KEY_ACCESS_KEY_ID)?,
            secret_access_key: required(KEY_SECRET_ACCESS_KEY)?,
            session_token: section.get(KEY_SESSION_TOKEN).map(String::from),
            profile,
        })
    }

    pub fn status(&self, profile: Option<&str>) -> ProfileStatus {
        let profile = self.settings.resolve_profile(profile);
        if self.is_expired(&profile) {
            ProfileStatus::Expired
        } else {
            ProfileStatus::Valid
        }
    }

    pub fn list(&self) -> Vec<SessionEntry> {
        session::entries(&self.credentials, Utc::now(), false)
    }

    pub fn sessions(&self) -> Vec<SessionEntry> {
        session::entries(&self.credentials, Utc::now(), true)
    }

    pub fn roles(&self) -> Vec<String> {
        profile::assumable_roles(&self.config)
    }

    /// Copy both files into a new `backup-<timestamp>` directory
    pub fn backup(&self) -> Result<PathBuf> {
        let backup_dir = self.settings.backup_root.join(format!(
            "backup-{}",
            Local::now().format("%Y%m%d-%H%M%S")
        ));

        fs::create_dir_all(&backup_dir).map_err(|e| Error::io(&backup_dir, e))?;

        for (source, file_name) in [
            (self.credentials.path(), AWS_CREDENTIALS_FILE_NAME),
            (self.config.path(), AWS_CONFIG_FILE_NAME),
        ] {
            if !source.exists() {
                warn!("{} does not exist, not backed up", source.display());
                continue;
            }
            fs::copy(source, backup_dir.join(file_name)).map_err(|e| Error::io(source, e))?;
        }

        info!("Backup created in {}", backup_dir.display());
        Ok(backup_dir)
    }

    fn persist(&self) -> Result<()> {
        self.credentials.persist()?;
        self.config.persist()?;

        annotate::syntax(self.config.path())?;
        annotate::syntax(self.credentials.path())?;
        Ok(())
    }
}
