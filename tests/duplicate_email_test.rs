use axum_test::TestServer;
use http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{user_path, USERS};

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let first = server
        .post(USERS)
        .json(&common::create_test_user_json("First", "dup@example.com"))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = server
        .post(USERS)
        .json(&common::create_test_user_json("Second", "dup@example.com"))
        .await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);

    let body: Value = second.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User with this email already exists");
    assert!(body["data"].is_null());

    let list: Value = server.get(USERS).await.json();
    assert_eq!(list["data"]["total"], 1);
    assert_eq!(list["data"]["users"][0]["name"], "First");
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_yield_one_success() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let payload_a = common::create_test_user_json("Racer A", "race@example.com");
    let payload_b = common::create_test_user_json("Racer B", "race@example.com");

    let (a, b) = tokio::join!(
        server.post(USERS).json(&payload_a),
        server.post(USERS).json(&payload_b)
    );

    let mut statuses = vec![a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let list: Value = server.get(USERS).await.json();
    assert_eq!(list["data"]["total"], 1);
}

#[tokio::test]
async fn test_update_to_taken_email_returns_409() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    server
        .post(USERS)
        .json(&common::create_test_user_json("Alice", "alice@example.com"))
        .await
        .assert_status(StatusCode::CREATED);
    let bob: Value = server
        .post(USERS)
        .json(&common::create_test_user_json("Bob", "bob@example.com"))
        .await
        .json();
    let bob_id = bob["data"]["id"].as_str().unwrap();

    let response = server
        .patch(&user_path(bob_id))
        .json(&json!({"email": "alice@example.com"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = server
        .put(&user_path(bob_id))
        .json(&json!({"name": "Bob", "email": "alice@example.com"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // Bob is unchanged
    let body: Value = server.get(&user_path(bob_id)).await.json();
    assert_eq!(body["data"]["email"], "bob@example.com");

    // Keeping one's own email is not a conflict
    let response = server
        .put(&user_path(bob_id))
        .json(&json!({"name": "Robert", "email": "bob@example.com"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
