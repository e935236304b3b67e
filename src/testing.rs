//! Test doubles shared by the manager and command tests

use std::{
    fs,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tempfile::TempDir;

use crate::{
    aws::{AssumeRoleRequest, Credentials, RoleAssumer},
    config::Settings,
    error::Result,
    expiry::format_expiration,
    manager::CredentialManager,
    prompt::TokenPrompt,
};

pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/TestRole";
pub const MFA_SERIAL: &str = "arn:aws:iam::123456789012:mfa/user";

#[derive(Clone, Default)]
pub struct MockAssumer {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<AssumeRoleRequest>>>,
    fail: bool,
}

impl MockAssumer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AssumeRoleRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RoleAssumer for MockAssumer {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> anyhow::Result<Credentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.fail {
            anyhow::bail!("AccessDenied: not authorized to perform sts:AssumeRole");
        }

        Ok(Credentials {
            access_key_id: "ASIANEWKEY".to_string(),
            secret_access_key: "NEWSECRET".to_string(),
            session_token: "NEWTOKEN".to_string(),
            expiration: Utc::now() + Duration::hours(1),
        })
    }
}

pub enum ScriptedPrompt {
    Token(&'static str),
    Cancel,
}

impl TokenPrompt for ScriptedPrompt {
    fn mfa_token(&self, _mfa_serial: &str) -> Result<Option<String>> {
        match self {
            Self::Token(token) => Ok(Some(token.to_string())),
            Self::Cancel => Ok(None),
        }
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub settings: Settings,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            credentials_path: dir.path().join("credentials"),
            config_path: dir.path().join("config"),
            default_region: None,
            active_profile: None,
            backup_root: dir.path().join("backups"),
        };

        fs::write(
            &settings.config_path,
            format!(
                "[default]

[profile role1]
role_arn={ROLE_ARN}

[profile role2]
mfa_serial={MFA_SERIAL}
role_arn={ROLE_ARN}

[profile valid]
role_arn={ROLE_ARN}

[profile expired]
role_arn={ROLE_ARN}

[profile valid_temp]

[profile expired_temp]
"
            ),
        )
        .unwrap();

        fs::write(
            &settings.credentials_path,
            format!(
                "[default]
aws_access_key_id=AKIDEFAULT
aws_secret_access_key=SECRETDEFAULT

[role1]

[role2]

[valid_temp]
aws_access_key_id=ASIAVALID
aws_secret_access_key=SECRETVALID
aws_session_token=TOKENVALID
aws_expiration={}

[expired_temp]
aws_access_key_id=ASIAEXPIRED
aws_secret_access_key=SECRETEXPIRED
aws_session_token=TOKENEXPIRED
aws_expiration=2021-07-29T16:18:13+00:00
",
                format_expiration(&(Utc::now() + Duration::hours(1)))
            ),
        )
        .unwrap();

        Self { dir, settings }
    }

    pub fn manager<P: TokenPrompt>(
        &self,
        assumer: MockAssumer,
        prompt: P,
    ) -> CredentialManager<MockAssumer, P> {
        CredentialManager::load(self.settings.clone(), assumer, prompt).unwrap()
    }

    pub fn credentials_text(&self) -> String {
        fs::read_to_string(&self.settings.credentials_path).unwrap()
    }

    pub fn config_text(&self) -> String {
        fs::read_to_string(&self.settings.config_path).unwrap()
    }
}
