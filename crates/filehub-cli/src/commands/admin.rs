//! Administration CLI commands.

use clap::{Args, Subcommand};
use serde_json::{Value, json};

use super::files::PageArgs;
use crate::output::{self, OutputFormat, UserRow};
use filehub_client::FileHubClient;
use filehub_core::error::AppError;
use filehub_core::types::PageQuery;
use filehub_entity::user::UserDto;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Search all users
    Users {
        /// Search keyword
        keyword: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show user, file and storage totals
    Stats,
    /// Ban a user
    Ban {
        /// User ID
        id: String,
    },
    /// Lift a user's ban
    Unban {
        /// User ID
        id: String,
    },
    /// Toggle a user's role
    Role {
        /// User ID
        id: String,
    },
    /// Delete a user account
    DeleteUser {
        /// User ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show recent server log lines
    Logs {
        /// Number of lines
        #[arg(short = 'n', long)]
        lines: Option<u32>,
    },
}

/// Execute admin commands
pub async fn execute(
    client: &FileHubClient,
    args: &AdminArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let admin = client.admin();

    match &args.command {
        AdminCommand::Users { keyword, page } => {
            let mut query = PageQuery::new(page.page, page.size);
            if let Some(keyword) = keyword {
                query = query.with_keyword(keyword.clone());
            }
            let envelope = admin.search_users_paginated(&query).await?;
            output::print_page(&envelope, format, |item| {
                UserRow::from(&UserDto::from_api_response(item))
            });
        }
        AdminCommand::Stats => {
            let users = admin.total_users().await?;
            let files = admin.total_files().await?;
            let storage = admin.total_storage().await?;
            match format {
                OutputFormat::Json => output::print_json(&json!({
                    "users": users,
                    "files": files,
                    "storage": storage,
                })),
                OutputFormat::Table => {
                    output::print_kv("Users", &scalar(&users));
                    output::print_kv("Files", &scalar(&files));
                    output::print_kv("Storage", &output::storage_value(&storage));
                }
            }
        }
        AdminCommand::Ban { id } => {
            admin.ban_user(id).await?;
            output::print_success(&format!("User {} banned", id));
        }
        AdminCommand::Unban { id } => {
            admin.unban_user(id).await?;
            output::print_success(&format!("User {} unbanned", id));
        }
        AdminCommand::Role { id } => {
            admin.change_role(id).await?;
            output::print_success(&format!("Role of user {} changed", id));
        }
        AdminCommand::DeleteUser { id, yes } => {
            let confirmed = *yes
                || dialoguer::Confirm::new()
                    .with_prompt(format!("Delete user {} and all their files?", id))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
            if !confirmed {
                output::print_warning("Aborted");
                return Ok(());
            }
            admin.delete_user(id).await?;
            output::print_success(&format!("User {} deleted", id));
        }
        AdminCommand::Logs { lines } => {
            let logs = admin.logs(*lines).await?;
            match (format, logs.as_array()) {
                (OutputFormat::Table, Some(entries)) => {
                    for entry in entries {
                        println!("{}", scalar(entry));
                    }
                }
                (OutputFormat::Table, None) if logs.is_string() => println!("{}", scalar(&logs)),
                _ => output::print_json(&logs),
            }
        }
    }

    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
