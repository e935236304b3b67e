use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification used by the CLI to decide how to report a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Provider,
    NotFound,
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("role_arn is not configured for profile '{0}'")]
    MissingRoleArn(String),

    #[error("Could not determine home directory. Please set HOME environment variable.")]
    HomeDirectory,

    /// Failure reported by the identity provider, passed through untouched
    #[error(transparent)]
    Provider(anyhow::Error),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("{key} not found in profile '{profile}'")]
    MissingKey { profile: String, key: &'static str },

    #[error("Failed to read {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read MFA token")]
    Prompt(#[source] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRoleArn(_) | Self::HomeDirectory => ErrorKind::Configuration,
            Self::Provider(_) => ErrorKind::Provider,
            Self::ProfileNotFound(_) | Self::MissingKey { .. } => ErrorKind::NotFound,
            Self::Parse { .. } | Self::Io { .. } | Self::Prompt(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
