//! Login, registration, and logout.

use std::sync::Arc;

use tracing::info;

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_entity::session::{AuthRequest, JwtResponse};

use crate::http::{ApiClient, RequestDescriptor};

/// Authentication endpoints. Login and registration are sent without a
/// bearer token and store the returned token in the session.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    /// Creates a new auth client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in with a username and password.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<JwtResponse> {
        let body = AuthRequest::new(username, password).login_body();
        let request = RequestDescriptor::post("/api/auth/login").json(&body)?;
        let response = self.authenticate(request).await?;
        info!(username, "Logged in");
        Ok(response)
    }

    /// Register a new account. The whole request, including the email when
    /// set, is sent as the body.
    pub async fn register(&self, request: &AuthRequest) -> AppResult<JwtResponse> {
        let descriptor = RequestDescriptor::post("/api/auth/register").json(request)?;
        let response = self.authenticate(descriptor).await?;
        info!(username = %request.username, "Registered account");
        Ok(response)
    }

    /// Discard the session token and session-scoped preferences. No request
    /// is made.
    pub fn logout(&self) {
        self.api.session().remove();
        info!("Logged out");
    }

    async fn authenticate(&self, request: RequestDescriptor) -> AppResult<JwtResponse> {
        let value = self.api.execute_unauthenticated(request).await?.into_json()?;
        let response: JwtResponse = serde_json::from_value(value)?;

        if let Some(token) = response.token.clone().filter(|t| !t.is_empty()) {
            // Durable stores may touch the disk.
            let session = Arc::clone(self.api.session());
            tokio::task::spawn_blocking(move || session.set(token))
                .await
                .map_err(|e| AppError::internal(format!("Failed to store token: {e}")))?;
        }

        Ok(response)
    }
}
