//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use wiremock::MockServer;

use filehub_client::{ApiClient, FileHubClient, Session};

/// Header segment of every test token.
const HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

/// Build an unsigned token carrying `claims`.
pub fn token(claims: Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{HEADER}.{payload}.c2lnbmF0dXJl")
}

/// A token for `role` valid for another hour.
pub fn token_for(role: &str) -> String {
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    token(json!({ "sub": "1", "username": "ana", "role": role, "exp": exp }))
}

/// A user token valid for another hour.
pub fn user_token() -> String {
    token_for("user")
}

/// An admin token valid for another hour.
pub fn admin_token() -> String {
    token_for("admin")
}

/// An origin on a local port nothing is listening on.
pub fn unused_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Test context: a mock backend and a client pointed at it.
pub struct TestApp {
    /// The mock backend.
    pub server: MockServer,
    /// Client wired to the mock backend with an in-memory session.
    pub client: FileHubClient,
}

impl TestApp {
    /// Start a mock backend with a signed-out client.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let api = ApiClient::with_client(
            reqwest::Client::new(),
            &server.uri(),
            Arc::new(Session::in_memory()),
        );
        Self {
            server,
            client: FileHubClient::from_api(api),
        }
    }

    /// Start a mock backend with a client holding `token`.
    pub async fn signed_in(token: &str) -> Self {
        let app = Self::new().await;
        app.client.session().set(token);
        app
    }

    /// The executor behind the client.
    pub fn api(&self) -> ApiClient {
        ApiClient::with_client(
            reqwest::Client::new(),
            &self.server.uri(),
            self.client.session().clone(),
        )
    }

    /// Requests the mock backend has received so far.
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
