//! Integration tests for authentication flow.

mod helpers;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use std::sync::Arc;

use filehub_client::session::TOKEN_KEY;
use filehub_client::storage::{FileStore, MemoryStore};
use filehub_client::{ApiClient, FileHubClient, Session};
use filehub_core::traits::KeyValueStore;
use filehub_entity::session::AuthRequest;

#[tokio::test]
async fn test_login_success_stores_token() {
    let token = helpers::admin_token();
    let app = helpers::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "ana", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token, "type": "Bearer" })))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app.client.auth().login("ana", "secret").await.unwrap();

    assert_eq!(response.token.as_deref(), Some(token.as_str()));
    assert_eq!(response.extra["type"], "Bearer");
    let session = app.client.session();
    assert_eq!(session.bearer_token(), Some(token));
    assert!(session.is_authenticated());
    assert!(session.is_admin());
}

#[tokio::test]
async fn test_login_is_sent_without_bearer_header() {
    let app = helpers::TestApp::signed_in("stale.token.value").await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .mount(&app.server)
        .await;

    let err = app.client.auth().login("ana", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message, "Bad credentials");
    let requests = app.requests().await;
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(
        app.client.session().bearer_token().as_deref(),
        Some("stale.token.value")
    );
}

#[tokio::test]
async fn test_response_without_token_leaves_session_alone() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "verify email" })))
        .mount(&app.server)
        .await;

    let request = AuthRequest::new("bob", "pw");
    let response = app.client.auth().register(&request).await.unwrap();

    assert!(response.token.is_none());
    assert!(app.client.session().bearer_token().is_none());
}

#[tokio::test]
async fn test_register_sends_email() {
    let token = helpers::user_token();
    let app = helpers::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({ "username": "bob", "password": "pw", "email": "bob@x.io" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "token": token })))
        .expect(1)
        .mount(&app.server)
        .await;

    let request = AuthRequest::new("bob", "pw").with_email("bob@x.io");
    app.client.auth().register(&request).await.unwrap();

    assert!(app.client.session().is_authenticated());
    assert!(!app.client.session().is_admin());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = helpers::TestApp::signed_in(&helpers::admin_token()).await;
    let session = app.client.session();
    session.set_admin_view_mode(true);

    app.client.auth().logout();

    assert!(session.bearer_token().is_none());
    assert!(!session.is_authenticated());
    assert!(!session.admin_view_mode());
    assert!(app.requests().await.is_empty());
}

#[tokio::test]
async fn test_login_persists_token_to_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("session.json");
    let token = helpers::user_token();
    let server = wiremock::MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(&server)
        .await;

    let session = Arc::new(Session::new(
        Arc::new(FileStore::new(&store_path)),
        Arc::new(MemoryStore::new()),
    ));
    let api = ApiClient::with_client(reqwest::Client::new(), &server.uri(), session);
    let client = FileHubClient::from_api(api);

    client.auth().login("ana", "secret").await.unwrap();

    let reopened = FileStore::new(&store_path);
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), Some(token));
}
