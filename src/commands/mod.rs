pub mod assume;
pub mod backup;
pub mod clean;
pub mod completions;
pub mod export;
pub mod list;
pub mod roles;
pub mod status;

pub use assume::AssumeCommand;
pub use backup::BackupCommand;
pub use clean::CleanCommand;
pub use completions::CompletionsCommand;
pub use export::ExportCommand;
pub use list::{ListCommand, SessionsCommand};
pub use roles::RolesCommand;
pub use status::StatusCommand;
