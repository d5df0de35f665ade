//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn register_body(email: &str, username: &str) -> String {
    json!({
        "username": username,
        "email": email,
        "password": "secret1",
        "age": 25,
        "gender": "male",
        "height": 175.0,
        "weight": 70.0,
        "activity_level": "moderate",
        "goal": "muscle_build",
    })
    .to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("register");
    let username = format!("reg_{}", rand::random::<u32>());
    let (status, response) = app
        .post("/api/v1/auth/register", &register_body(&email, &username), None)
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["email"], email);
    assert_eq!(response["message"], "Register success");
    assert!(response["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("duplicate");
    let first = register_body(&email, &format!("dup_a_{}", rand::random::<u32>()));
    let second = register_body(&email, &format!("dup_b_{}", rand::random::<u32>()));

    let (status, _) = app.post("/api/v1/auth/register", &first, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.post("/api/v1/auth/register", &second, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("Email already registered"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_short_password() {
    let app = common::TestApp::new().await;

    let body = json!({
        "username": format!("short_{}", rand::random::<u32>()),
        "email": common::unique_email("shortpw"),
        "password": "abc",
        "age": 25,
        "gender": "male",
        "height": 175.0,
        "weight": 70.0,
        "activity_level": "moderate",
        "goal": "maintenance",
    });

    let (status, _) = app
        .post("/api/v1/auth/register", &body.to_string(), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success() {
    let app = common::TestApp::new().await;

    let (token, _email) = app.register_and_login().await;
    assert!(!token.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;

    let (_token, email) = app.register_and_login().await;

    let body = json!({ "email": email, "password": "wrong-pass" });
    let (status, _) = app
        .post("/api/v1/auth/login", &body.to_string(), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_missing_credentials() {
    let app = common::TestApp::new().await;

    let body = json!({ "email": "", "password": "" });
    let (status, _) = app
        .post("/api/v1/auth/login", &body.to_string(), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_google_login_invalid_token() {
    let app = common::TestApp::new().await;

    let body = json!({ "token": "not-a-real-google-token" });
    let (status, _) = app
        .post("/api/v1/auth/google", &body.to_string(), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_roundtrip() {
    let app = common::TestApp::new().await;

    let (token, email) = app.register_and_login().await;

    let (status, response) = app.get("/api/v1/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["email"], email);
    assert!(profile.get("password_hash").is_none());

    let update = json!({ "weight": 64.5, "goal": "weight_loss" });
    let (status, response) = app
        .put("/api/v1/profile", &update.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["weight"], 64.5);
    assert_eq!(profile["goal"], "weight_loss");
}
