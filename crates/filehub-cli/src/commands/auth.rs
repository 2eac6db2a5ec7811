//! Sign-in, registration, and session commands.

use clap::Args;
use serde_json::json;

use crate::output::{self, OutputFormat};
use filehub_client::FileHubClient;
use filehub_core::error::AppError;
use filehub_entity::session::{AuthRequest, JwtResponse};

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for registration
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Sign in and persist the returned token
pub async fn login(client: &FileHubClient, args: &LoginArgs) -> Result<(), AppError> {
    let username = prompt_username(args.username.as_deref())?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let response = client.auth().login(&username, &password).await?;
    report(client, &response, &format!("Signed in as '{}'", username));
    Ok(())
}

/// Create an account and persist the returned token
pub async fn register(client: &FileHubClient, args: &RegisterArgs) -> Result<(), AppError> {
    let username = prompt_username(args.username.as_deref())?;

    let email = match &args.email {
        Some(e) => Some(e.clone()),
        None => {
            let e: String = dialoguer::Input::new()
                .with_prompt("Email (optional, press Enter to skip)")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
            if e.is_empty() { None } else { Some(e) }
        }
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let mut request = AuthRequest::new(&username, password);
    if let Some(email) = email {
        request = request.with_email(email);
    }

    let response = client.auth().register(&request).await?;
    report(client, &response, &format!("Account '{}' created", username));
    Ok(())
}

/// Discard the stored session
pub fn logout(client: &FileHubClient) {
    client.auth().logout();
    output::print_success("Signed out");
}

/// Show who the stored token belongs to
pub fn whoami(client: &FileHubClient, format: OutputFormat) {
    let session = client.session();
    let claims = session.claims();
    let authenticated = session.is_authenticated();

    let username = claims
        .as_ref()
        .and_then(|c| c.username.clone().or_else(|| c.sub.clone()));
    let role = claims.as_ref().map(|c| c.role().to_string());
    let expires = claims
        .as_ref()
        .and_then(|c| c.expires_at())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    match format {
        OutputFormat::Json => output::print_json(&json!({
            "authenticated": authenticated,
            "username": username,
            "role": role,
            "expiresAt": expires,
        })),
        OutputFormat::Table => {
            if session.bearer_token().is_none() {
                output::print_warning("Not signed in");
                return;
            }
            output::print_kv("Username", username.as_deref().unwrap_or("-"));
            output::print_kv("Role", role.as_deref().unwrap_or("-"));
            output::print_kv("Expires", expires.as_deref().unwrap_or("-"));
            output::print_kv("Authenticated", if authenticated { "yes" } else { "no" });
        }
    }
}

fn prompt_username(given: Option<&str>) -> Result<String, AppError> {
    match given {
        Some(u) => Ok(u.to_string()),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e))),
    }
}

fn report(client: &FileHubClient, response: &JwtResponse, success: &str) {
    if response.token.is_some() && client.session().is_authenticated() {
        output::print_success(success);
    } else if response.token.is_some() {
        output::print_warning("Server returned a token that is expired or unreadable");
    } else {
        output::print_warning("Server did not return a token; you are not signed in");
    }
}
