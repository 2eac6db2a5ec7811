//! Administrative endpoints.

use serde_json::Value;
use tracing::info;

use filehub_core::result::AppResult;
use filehub_core::types::PageQuery;

use crate::http::{ApiClient, Payload, RequestDescriptor};

/// Number of log lines fetched when the caller does not say.
pub const DEFAULT_LOG_LINES: u32 = 10;

/// Admin endpoints. The backend enforces the admin role; this client does
/// not check it.
#[derive(Debug, Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    /// Creates a new admin client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Search all users, one page at a time. The envelope is returned as
    /// sent by the server.
    pub async fn search_users_paginated(&self, query: &PageQuery) -> AppResult<Value> {
        let request =
            RequestDescriptor::get("/api/admin/users/search-paginated").params(query.to_params());
        self.api.execute(request).await?.into_json()
    }

    /// Number of registered users.
    pub async fn total_users(&self) -> AppResult<Value> {
        self.get("/api/admin/users/count").await
    }

    /// Number of stored files.
    pub async fn total_files(&self) -> AppResult<Value> {
        self.get("/api/admin/files/count").await
    }

    /// Storage used across all users.
    pub async fn total_storage(&self) -> AppResult<Value> {
        self.get("/api/admin/storage").await
    }

    /// The last `lines` server log lines, ten by default.
    pub async fn logs(&self, lines: Option<u32>) -> AppResult<Value> {
        let lines = lines.unwrap_or(DEFAULT_LOG_LINES);
        self.get(&format!("/api/admin/logs/{lines}")).await
    }

    /// Delete a user account.
    pub async fn delete_user(&self, user_id: &str) -> AppResult<Payload> {
        let payload = self
            .api
            .execute(RequestDescriptor::delete(format!("/api/admin/users/{user_id}")))
            .await?;
        info!(user_id, "Deleted user");
        Ok(payload)
    }

    /// Ban a user.
    pub async fn ban_user(&self, user_id: &str) -> AppResult<Payload> {
        self.post(&format!("/api/admin/ban/{user_id}")).await
    }

    /// Lift a ban.
    pub async fn unban_user(&self, user_id: &str) -> AppResult<Payload> {
        self.post(&format!("/api/admin/unban/{user_id}")).await
    }

    /// Toggle a user's role. The server decides the new role.
    pub async fn change_role(&self, user_id: &str) -> AppResult<Payload> {
        self.post(&format!("/api/admin/role/{user_id}")).await
    }

    async fn get(&self, endpoint: &str) -> AppResult<Value> {
        self.api
            .execute(RequestDescriptor::get(endpoint))
            .await?
            .into_json()
    }

    async fn post(&self, endpoint: &str) -> AppResult<Payload> {
        self.api.execute(RequestDescriptor::post(endpoint)).await
    }
}
