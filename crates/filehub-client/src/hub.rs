//! Explicit wiring of the session, executor, and resource clients.

use std::sync::Arc;

use filehub_core::config::{ApiConfig, ClientConfig};
use filehub_core::result::AppResult;

use crate::http::ApiClient;
use crate::services::{AdminClient, AuthClient, FileClient, UserClient};
use crate::session::Session;
use crate::storage::{FileStore, MemoryStore};

/// Every resource client sharing one executor and session.
#[derive(Debug, Clone)]
pub struct FileHubClient {
    session: Arc<Session>,
    auth: AuthClient,
    files: FileClient,
    users: UserClient,
    admin: AdminClient,
}

impl FileHubClient {
    /// Build a client from configuration.
    ///
    /// The token is persisted in the configured session file and loaded
    /// immediately; session-scoped preferences live in memory.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let session = Arc::new(Session::new(
            Arc::new(FileStore::new(config.session.token_file.clone())),
            Arc::new(MemoryStore::new()),
        ));
        session.load();
        Self::with_session(&config.api, session)
    }

    /// Build a client around an existing session.
    pub fn with_session(config: &ApiConfig, session: Arc<Session>) -> AppResult<Self> {
        let api = ApiClient::new(config, session.clone())?;
        Ok(Self::from_api(api))
    }

    /// Build a client around an existing executor.
    pub fn from_api(api: ApiClient) -> Self {
        Self {
            session: api.session().clone(),
            auth: AuthClient::new(api.clone()),
            files: FileClient::new(api.clone()),
            users: UserClient::new(api.clone()),
            admin: AdminClient::new(api),
        }
    }

    /// The shared session.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// File endpoints.
    pub fn files(&self) -> &FileClient {
        &self.files
    }

    /// User endpoints.
    pub fn users(&self) -> &UserClient {
        &self.users
    }

    /// Admin endpoints.
    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }
}
