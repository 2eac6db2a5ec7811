//! The signed-in user's account and the user directory.

use serde_json::Value;

use filehub_core::result::AppResult;
use filehub_core::types::QueryParams;
use filehub_entity::user::UserDto;

use crate::http::{ApiClient, RequestDescriptor};

/// User endpoints.
#[derive(Debug, Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    /// Creates a new user client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The signed-in user's account.
    pub async fn account(&self) -> AppResult<UserDto> {
        let value = self
            .api
            .execute(RequestDescriptor::get("/api/users/account"))
            .await?
            .into_json()?;
        Ok(UserDto::from_api_response(&value))
    }

    /// Storage used by the signed-in user.
    pub async fn used_storage(&self) -> AppResult<Value> {
        self.api
            .execute(RequestDescriptor::get("/api/users/storage/used"))
            .await?
            .into_json()
    }

    /// Storage quota of the signed-in user.
    pub async fn max_storage(&self) -> AppResult<Value> {
        self.api
            .execute(RequestDescriptor::get("/api/users/storage/user-max"))
            .await?
            .into_json()
    }

    /// Search users by keyword.
    pub async fn search_users(&self, keyword: &str) -> AppResult<Value> {
        let request = RequestDescriptor::get("/api/users")
            .params(QueryParams::new().insert("keyword", keyword));
        self.api.execute(request).await?.into_json()
    }
}
