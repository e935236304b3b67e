/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS config file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// AWS shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// Overrides the location of the shared credentials file
pub const ENV_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// Overrides the location of the config file
pub const ENV_CONFIG_FILE: &str = "AWS_CONFIG_FILE";

/// Region used when a role profile does not configure one
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Profile targeted by `export` and `status` when none is given
pub const ENV_PROFILE: &str = "AWS_PROFILE";

/// Region used when neither the profile nor the environment provides one
pub const DEFAULT_AWS_REGION: &str = "eu-west-1";

/// Name of the unprefixed profile in both files
pub const DEFAULT_PROFILE: &str = "default";

/// Suffix appended to a role name to form its temporary alias
pub const TEMP_SUFFIX: &str = "_temp";

/// Editor hint appended to both files after every rewrite
pub const VIM_SYNTAX: &str = "# vim: syntax=dosini";

/// Credentials file keys
pub const KEY_ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const KEY_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const KEY_SESSION_TOKEN: &str = "aws_session_token";
pub const KEY_EXPIRATION: &str = "aws_expiration";

/// Config file keys
pub const KEY_ROLE_ARN: &str = "role_arn";
pub const KEY_REGION: &str = "region";
pub const KEY_MFA_SERIAL: &str = "mfa_serial";
pub const KEY_SOURCE_PROFILE: &str = "source_profile";

/// Section name of a profile in the config file.
///
/// Every profile except `default` carries a `profile ` prefix there.
pub fn config_section_name(profile: &str) -> String {
    if profile == DEFAULT_PROFILE {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}

/// Default alias for the temporary credentials of `role`
pub fn temp_alias(role: &str) -> String {
    format!("{role}{TEMP_SUFFIX}")
}
