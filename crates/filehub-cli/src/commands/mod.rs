//! CLI command definitions and dispatch.

pub mod admin;
pub mod auth;
pub mod files;
pub mod guard;
pub mod user;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use filehub_client::FileHubClient;
use filehub_core::config::ClientConfig;
use filehub_core::error::AppError;

/// FileHub file storage, sharing and administration client
#[derive(Debug, Parser)]
#[command(name = "filehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/filehub.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login(auth::LoginArgs),
    /// Create an account and sign in
    Register(auth::RegisterArgs),
    /// Discard the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Your files
    Files(files::FilesArgs),
    /// Your account and the user directory
    User(user::UserArgs),
    /// Administration
    Admin(admin::AdminArgs),
}

impl Commands {
    /// Command name as it appears in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Files(_) => "files",
            Self::User(_) => "user",
            Self::Admin(_) => "admin",
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ClientConfig) -> Result<(), AppError> {
        debug!(
            command = self.command.name(),
            config = %self.config,
            base_url = %config.api.base_url,
            "Executing command"
        );
        let client = FileHubClient::new(config)?;

        match &self.command {
            Commands::Login(args) => auth::login(&client, args).await,
            Commands::Register(args) => auth::register(&client, args).await,
            Commands::Logout => {
                auth::logout(&client);
                Ok(())
            }
            Commands::Whoami => {
                auth::whoami(&client, self.format);
                Ok(())
            }
            Commands::Files(args) => {
                guard::require_auth(client.session())?;
                files::execute(&client, args, self.format).await
            }
            Commands::User(args) => {
                guard::require_auth(client.session())?;
                user::execute(&client, args, self.format).await
            }
            Commands::Admin(args) => {
                guard::require_admin(client.session())?;
                admin::execute(&client, args, self.format).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let cli = Cli::parse_from(["filehub", "--config", "other.toml", "logout"]);
        assert_eq!(cli.config, "other.toml");
        assert_eq!(cli.command.name(), "logout");

        let cli = Cli::parse_from(["filehub", "files", "recent"]);
        assert_eq!(cli.command.name(), "files");
    }
}
