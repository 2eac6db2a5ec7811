//! Account and user directory CLI commands.

use clap::{Args, Subcommand};
use serde_json::{Value, json};

use crate::output::{self, OutputFormat, UserRow};
use filehub_client::FileHubClient;
use filehub_core::error::AppError;
use filehub_entity::user::UserDto;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Show your account
    Account,
    /// Show storage used and available
    Storage,
    /// Search users by name
    Search {
        /// Search keyword
        keyword: String,
    },
}

/// Execute user commands
pub async fn execute(
    client: &FileHubClient,
    args: &UserArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = client.users();

    match &args.command {
        UserCommand::Account => {
            let account = users.account().await?;
            output::print_list(&[UserRow::from(&account)], format);
        }
        UserCommand::Storage => {
            let used = users.used_storage().await?;
            let max = users.max_storage().await?;
            match format {
                OutputFormat::Json => output::print_json(&json!({ "used": used, "max": max })),
                OutputFormat::Table => {
                    output::print_kv("Used", &output::storage_value(&used));
                    output::print_kv("Available", &output::storage_value(&max));
                }
            }
        }
        UserCommand::Search { keyword } => {
            let found = users.search_users(keyword).await?;
            print_users(&found, format);
        }
    }

    Ok(())
}

/// Print a user list, or the raw value when it is not a list
fn print_users(value: &Value, format: OutputFormat) {
    match (format, value.as_array()) {
        (OutputFormat::Table, Some(items)) => {
            let rows: Vec<UserRow> = items
                .iter()
                .map(|item| UserRow::from(&UserDto::from_api_response(item)))
                .collect();
            output::print_list(&rows, format);
        }
        _ => output::print_json(value),
    }
}
