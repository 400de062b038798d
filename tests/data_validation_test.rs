use axum_test::TestServer;
use http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{user_path, USERS};

async fn test_server() -> TestServer {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_create_rejects_invalid_payloads() {
    let server = test_server().await;

    let cases = vec![
        ("missing name", json!({"email": "a@example.com"})),
        ("missing email", json!({"name": "Alice"})),
        ("empty name", json!({"name": "", "email": "a@example.com"})),
        ("blank name", json!({"name": "   ", "email": "a@example.com"})),
        (
            "long name",
            json!({"name": "x".repeat(101), "email": "a@example.com"}),
        ),
        ("bad email", json!({"name": "Alice", "email": "not-an-email"})),
        ("email without dot", json!({"name": "Alice", "email": "alice@localhost"})),
        (
            "negative age",
            json!({"name": "Alice", "email": "a@example.com", "age": -1}),
        ),
        (
            "age too large",
            json!({"name": "Alice", "email": "a@example.com", "age": 151}),
        ),
        (
            "age wrong type",
            json!({"name": "Alice", "email": "a@example.com", "age": "thirty"}),
        ),
        ("name wrong type", json!({"name": 42, "email": "a@example.com"})),
    ];

    for (label, payload) in cases {
        let response = server.post(USERS).json(&payload).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "{} should be rejected",
            label
        );
        let body: Value = response.json();
        assert_eq!(body["success"], false, "{}", label);
        assert!(body["data"].is_null(), "{}", label);
    }

    // Nothing was stored
    let list: Value = server.get(USERS).await.json();
    assert_eq!(list["data"]["total"], 0);
}

#[tokio::test]
async fn test_boundary_values_are_accepted() {
    let server = test_server().await;

    let response = server
        .post(USERS)
        .json(&json!({"name": "x".repeat(100), "email": "edge1@example.com", "age": 0}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server
        .post(USERS)
        .json(&json!({"name": "Old Timer", "email": "edge2@example.com", "age": 150}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["age"], 150);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let server = test_server().await;

    let response = server
        .post(USERS)
        .text("{\"name\": \"Broken\",")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected() {
    let server = test_server().await;

    let response = server
        .post(USERS)
        .text("{\"name\": \"Plain\", \"email\": \"plain@example.com\"}")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Content-Type must be application/json");
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let server = test_server().await;

    let created: Value = server
        .post(USERS)
        .json(&common::create_test_user_json("Valid", "valid@example.com"))
        .await
        .json();
    let id = created["data"]["id"].as_str().unwrap();

    for payload in [
        json!({"email": "broken"}),
        json!({"name": ""}),
        json!({"age": 200}),
    ] {
        server
            .patch(&user_path(id))
            .json(&payload)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let body: Value = server.get(&user_path(id)).await.json();
    assert_eq!(body["data"]["name"], "Valid");
    assert_eq!(body["data"]["email"], "valid@example.com");
}

#[tokio::test]
async fn test_malformed_email_lookup_is_rejected() {
    let server = test_server().await;

    let response = server.get(&format!("{}/email/not-an-email", USERS)).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_over_length_email_is_rejected() {
    let server = test_server().await;

    let domain = format!("{}.{}.{}.com", "b".repeat(61), "c".repeat(61), "d".repeat(61));
    let at_limit = format!("{}@{}", "a".repeat(64), domain);
    let over_limit = format!("{}@{}.{}", "a".repeat(64), "e".repeat(60), domain);
    assert_eq!(at_limit.len(), 254);
    assert!(over_limit.len() > 254);

    let response = server
        .post(USERS)
        .json(&common::create_test_user_json("Long Mail", &over_limit))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());

    let created: Value = server
        .post(USERS)
        .json(&common::create_test_user_json("Long Mail", &at_limit))
        .await
        .json();
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_str().unwrap();

    server
        .patch(&user_path(id))
        .json(&json!({"email": over_limit}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get(&format!("{}/email/{}", USERS, over_limit))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
