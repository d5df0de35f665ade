//! Integration tests for admin user management

mod common;

use axum::http::StatusCode;
use serde_json::json;

/// Promote a registered user to admin straight in the database, then
/// log in again so the token carries the admin role
async fn admin_token(app: &common::TestApp) -> String {
    let (_, email) = app.register_and_login().await;

    sqlx::query("UPDATE users SET role = 'admin' WHERE email = $1")
        .bind(&email)
        .execute(&app.pool)
        .await
        .unwrap();

    let body = json!({ "email": email, "password": "secret1" });
    let (status, response) = app
        .post("/api/v1/auth/login", &body.to_string(), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["role"], "admin");
    response["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_lists_users_without_hashes() {
    let app = common::TestApp::new().await;
    let token = admin_token(&app).await;
    app.register_and_login().await;

    let (status, response) = app.get("/api/v1/admin/users", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let users: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(users.as_array().unwrap().len() >= 2);
    assert!(!response.contains("password_hash"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_updates_user_role() {
    let app = common::TestApp::new().await;
    let token = admin_token(&app).await;

    let (_, email) = app.register_and_login().await;
    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let body = json!({ "role": "admin", "tdee": 2500 });
    let (status, response) = app
        .put(&format!("/api/v1/admin/users/{user_id}"), &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["role"], "admin");
    assert_eq!(profile["tdee"], 2500);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_deletes_user_and_their_plans() {
    let app = common::TestApp::new().await;
    let admin = admin_token(&app).await;

    let (user_token, email) = app.register_and_login().await;
    let (status, _) = app
        .post("/api/v1/plans/generate", "{}", Some(&user_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let (status, response) = app
        .delete(&format!("/api/v1/admin/users/{user_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains(&email));

    // Cascade removed the user's plans
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_plans WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_delete_missing_user() {
    let app = common::TestApp::new().await;
    let token = admin_token(&app).await;

    let (status, _) = app
        .delete("/api/v1/admin/users/999999", Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_dashboard_statistics() {
    let app = common::TestApp::new().await;
    let token = admin_token(&app).await;

    let (status, response) = app.get("/api/v1/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let dash: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(dash["role"], "admin");
    assert_eq!(dash["message"], "Welcome Admin");
    assert!(dash["statistics"]["total_users"].as_i64().unwrap() >= 1);
    assert!(dash["recent_users"].as_array().unwrap().len() <= 5);
}
