use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sts::Client as StsClient;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{AssumeRoleRequest, Credentials, RoleAssumer};

/// `RoleAssumer` backed by AWS STS `AssumeRole`
#[derive(Debug, Clone)]
pub struct StsRoleAssumer {
    fallback_region: String,
}

impl StsRoleAssumer {
    /// `fallback_region` is used when the source profile has no region
    pub fn new(fallback_region: impl Into<String>) -> Self {
        Self {
            fallback_region: fallback_region.into(),
        }
    }

    // Priority: ENV vars -> Config file -> fallback region
    async fn load_config(&self, profile: &str) -> SdkConfig {
        let loaded = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .load()
            .await;

        match loaded.region() {
            Some(region) => {
                info!("Using region: {}", region);
                loaded
            }
            None if self.fallback_region.is_empty() => {
                warn!("No region configured and the fallback region is empty");
                loaded
            }
            None => {
                info!(
                    "No region configured, using default {} for STS",
                    self.fallback_region
                );
                aws_config::defaults(BehaviorVersion::latest())
                    .profile_name(profile)
                    .region(Region::new(self.fallback_region.clone()))
                    .load()
                    .await
            }
        }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<Credentials> {
        info!("Calling AWS STS AssumeRole");
        debug!("Source profile: {}", request.source_profile);
        debug!("Role ARN: {}", request.role_arn);
        debug!("Session name: {}", request.session_name);

        let config = self.load_config(&request.source_profile).await;
        let client = StsClient::new(&config);

        let mut call = client
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.session_name);

        if let Some(mfa) = &request.mfa {
            debug!("MFA serial: {}", mfa.serial);
            call = call.serial_number(&mfa.serial).token_code(&mfa.code);
        }

        let response = call.send().await.map_err(aws_sdk_sts::Error::from)?;

        let sts_creds = response
            .credentials()
            .context("AWS STS returned no credentials")?;

        let expiration = to_utc(sts_creds.expiration())
            .context("AWS STS returned an out of range expiration")?;

        let credentials = Credentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration,
        };

        info!("Successfully obtained AWS credentials");
        Ok(credentials)
    }
}

fn to_utc(timestamp: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
