use crate::{
    config::Settings,
    constants::{
        DEFAULT_PROFILE, KEY_MFA_SERIAL, KEY_REGION, KEY_ROLE_ARN, KEY_SOURCE_PROFILE,
        TEMP_SUFFIX, config_section_name,
    },
    error::{Error, Result},
    store::IniStore,
};

/// Assumable role as configured in the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProfile {
    pub role_arn: String,
    /// Empty when the profile sets an empty `region`
    pub region: String,
    pub mfa_serial: Option<String>,
    pub source_profile: String,
}

impl RoleProfile {
    /// Read `role` from the config store.
    ///
    /// `region` falls back to `AWS_DEFAULT_REGION`, then the built-in
    /// default; `source_profile` falls back to `default`.
    pub fn resolve(config: &IniStore, role: &str, settings: &Settings) -> Result<Self> {
        let section_name = config_section_name(role);
        let section = config
            .section(&section_name)
            .ok_or_else(|| Error::MissingRoleArn(role.to_string()))?;

        let role_arn = section
            .get(KEY_ROLE_ARN)
            .ok_or_else(|| Error::MissingRoleArn(role.to_string()))?
            .to_string();

        Ok(Self {
            role_arn,
            region: section
                .get(KEY_REGION)
                .unwrap_or_else(|| settings.fallback_region())
                .to_string(),
            mfa_serial: section
                .get(KEY_MFA_SERIAL)
                .filter(|serial| !serial.is_empty())
                .map(String::from),
            source_profile: section
                .get(KEY_SOURCE_PROFILE)
                .unwrap_or(DEFAULT_PROFILE)
                .to_string(),
        })
    }
}

/// Names of the config profiles that can be passed to `assume`
pub fn assumable_roles(config: &IniStore) -> Vec<String> {
    let mut roles: Vec<String> = config
        .sections()
        .into_iter()
        .filter_map(|section| section.strip_prefix("profile "))
        .filter(|name| *name != DEFAULT_PROFILE && !name.contains(TEMP_SUFFIX))
        .map(String::from)
        .collect();
    roles.sort();
    roles
}
