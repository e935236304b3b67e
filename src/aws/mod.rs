use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod sts;

/// AWS temporary credentials structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

/// MFA device serial together with the code read from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaToken {
    pub serial: String,
    pub code: String,
}

/// Everything needed to exchange the source profile for role credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
    /// Profile whose long-lived credentials sign the call
    pub source_profile: String,
    pub mfa: Option<MfaToken>,
}

/// The one identity provider capability the lifecycle manager relies on
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> anyhow::Result<Credentials>;
}

pub use sts::StsRoleAssumer;
