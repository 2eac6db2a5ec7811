//! Integration tests for the admin client.

mod helpers;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use filehub_core::types::PageQuery;

#[tokio::test]
async fn test_search_users_paginated() {
    let app = helpers::TestApp::signed_in(&helpers::admin_token()).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users/search-paginated"))
        .and(query_param("page", "2"))
        .and(query_param("size", "5"))
        .and(query_param("keyword", "an"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [], "totalElements": 0 })))
        .expect(1)
        .mount(&app.server)
        .await;

    let page = app
        .client
        .admin()
        .search_users_paginated(&PageQuery::new(2, 5).with_keyword("an"))
        .await
        .unwrap();
    assert_eq!(page["totalElements"], 0);
}

#[tokio::test]
async fn test_counts() {
    let app = helpers::TestApp::signed_in(&helpers::admin_token()).await;
    for (endpoint, value) in [
        ("/api/admin/users/count", 3),
        ("/api/admin/files/count", 14),
        ("/api/admin/storage", 4096),
    ] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(value)))
            .mount(&app.server)
            .await;
    }

    let admin = app.client.admin();
    assert_eq!(admin.total_users().await.unwrap(), json!(3));
    assert_eq!(admin.total_files().await.unwrap(), json!(14));
    assert_eq!(admin.total_storage().await.unwrap(), json!(4096));
}

#[tokio::test]
async fn test_logs_default_to_ten_lines() {
    let app = helpers::TestApp::signed_in(&helpers::admin_token()).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/logs/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "b"])))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/logs/50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.server)
        .await;

    let admin = app.client.admin();
    assert_eq!(admin.logs(None).await.unwrap(), json!(["a", "b"]));
    assert_eq!(admin.logs(Some(50)).await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_user_mutations() {
    let app = helpers::TestApp::signed_in(&helpers::admin_token()).await;
    for action in ["ban", "unban", "role"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/admin/{action}/8")))
            .respond_with(ResponseTemplate::new(200).set_body_string("done"))
            .expect(1)
            .mount(&app.server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let admin = app.client.admin();
    assert_eq!(admin.ban_user("8").await.unwrap().as_json(), None);
    admin.unban_user("8").await.unwrap();
    admin.change_role("8").await.unwrap();
    assert!(admin.delete_user("8").await.unwrap().is_no_content());
}

#[tokio::test]
async fn test_forbidden_for_non_admin() {
    let app = helpers::TestApp::signed_in(&helpers::user_token()).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users/count"))
        .respond_with(ResponseTemplate::new(403).set_body_string(""))
        .mount(&app.server)
        .await;

    assert!(!app.client.session().is_admin());
    let err = app.client.admin().total_users().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.message, "Request failed: 403");
}
