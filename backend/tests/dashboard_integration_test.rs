//! Integration tests for the dashboard aggregation

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_empty_for_new_user() {
    let app = common::TestApp::new().await;
    let (token, _) = app.register_and_login().await;

    let (status, response) = app.get("/api/v1/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let dash: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(dash["role"], "user");
    assert_eq!(dash["date_range"]["start"], "-");
    assert_eq!(dash["date_range"]["end"], "-");
    assert!(dash["weekly_stats"]["labels"].as_array().unwrap().is_empty());
    assert!(dash["today_plan"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_counts_only_completed_items() {
    let app = common::TestApp::new().await;
    let (token, _) = app.register_and_login().await;

    // One plan with two meals (300 complete, 400 incomplete) and one
    // completed workout (150)
    let (status, response) = app
        .post("/api/v1/plans", &json!({}).to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let plan: serde_json::Value = serde_json::from_str(&response).unwrap();
    let plan_id = plan["id"].as_i64().unwrap();

    let meal_done: i64 = sqlx::query_scalar(
        "INSERT INTO meals (daily_plan_id, name, meal_type, calories, protein, carbs, fat, is_completed)
         VALUES ($1, 'Eggs', 'breakfast', 300, 20, 30, 10, TRUE) RETURNING id",
    )
    .bind(plan_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert!(meal_done > 0);

    sqlx::query(
        "INSERT INTO meals (daily_plan_id, name, meal_type, calories, protein, carbs, fat, is_completed)
         VALUES ($1, 'Pasta', 'dinner', 400, 20, 30, 10, FALSE)",
    )
    .bind(plan_id)
    .execute(&app.pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO workouts (daily_plan_id, name, workout_type, duration_mins, calories_burned, is_completed)
         VALUES ($1, 'Jogging', 'cardio', 30, 150, TRUE)",
    )
    .bind(plan_id)
    .execute(&app.pool)
    .await
    .unwrap();

    let (status, response) = app.get("/api/v1/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let dash: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(dash["today_summary"]["calories_intake"], 300);
    assert_eq!(dash["today_summary"]["calories_burned"], 150);
    assert_eq!(dash["weekly_stats"]["intake"][0], 300);
    assert_eq!(dash["weekly_stats"]["burned"][0], 150);
    assert_eq!(dash["today_plan"]["id"], plan_id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_window_is_chronological() {
    let app = common::TestApp::new().await;
    let (token, _) = app.register_and_login().await;

    let (status, _) = app
        .post("/api/v1/plans/generate", "{}", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = app.get("/api/v1/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let dash: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(dash["weekly_stats"]["labels"].as_array().unwrap().len(), 7);

    // Window runs oldest to newest, and "today" is its first entry
    let start = dash["date_range"]["start"].as_str().unwrap();
    let end = dash["date_range"]["end"].as_str().unwrap();
    assert!(start < end);
    assert_eq!(dash["today_plan"]["date"].as_str().unwrap(), start);
}
