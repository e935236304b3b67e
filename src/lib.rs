pub mod annotate;
pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod expiry;
pub mod manager;
pub mod profile;
pub mod prompt;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{Error, ErrorKind, Result};
pub use manager::{AssumeOutcome, CredentialManager, ExportStatements, ProfileStatus};
