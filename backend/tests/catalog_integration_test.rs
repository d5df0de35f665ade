//! Integration tests for the public workout catalog

mod common;

use axum::http::StatusCode;
use serde_json::json;

/// Seed a plan with a few catalog-visible workouts
async fn seed_workouts(app: &common::TestApp) {
    let (token, _) = app.register_and_login().await;
    let (status, response) = app
        .post("/api/v1/plans", &json!({}).to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let plan: serde_json::Value = serde_json::from_str(&response).unwrap();
    let plan_id = plan["id"].as_i64().unwrap();

    for (name, workout_type, calories, duration) in [
        ("Morning Run", "cardio", 320, 30),
        ("Deadlift", "strength", 180, 20),
        ("Yoga Flow", "flexibility", 90, 40),
        ("Sprint Intervals", "cardio", 400, 25),
    ] {
        sqlx::query(
            "INSERT INTO workouts (daily_plan_id, name, workout_type, duration_mins, calories_burned)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(plan_id)
        .bind(name)
        .bind(workout_type)
        .bind(duration)
        .bind(calories)
        .execute(&app.pool)
        .await
        .unwrap();
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_catalog_search_is_case_insensitive() {
    let app = common::TestApp::new().await;
    app.cleanup().await;
    seed_workouts(&app).await;

    let (status, response) = app.get("/api/v1/catalog/?search=morning", None).await;
    assert_eq!(status, StatusCode::OK);

    let listing: serde_json::Value = serde_json::from_str(&response).unwrap();
    let data = listing["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Morning Run");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_catalog_type_filter_and_sort() {
    let app = common::TestApp::new().await;
    app.cleanup().await;
    seed_workouts(&app).await;

    let (status, response) = app
        .get("/api/v1/catalog/?type=cardio&sort=calories_desc", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let listing: serde_json::Value = serde_json::from_str(&response).unwrap();
    let data = listing["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Sprint Intervals");
    assert_eq!(data[1]["name"], "Morning Run");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_catalog_pagination_metadata() {
    let app = common::TestApp::new().await;
    app.cleanup().await;
    seed_workouts(&app).await;

    let (status, response) = app.get("/api/v1/catalog/?limit=3&page=2", None).await;
    assert_eq!(status, StatusCode::OK);

    let listing: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(listing["pagination"]["total_items"], 4);
    assert_eq!(listing["pagination"]["total_pages"], 2);
    assert_eq!(listing["pagination"]["current_page"], 2);
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_catalog_default_limit() {
    let app = common::TestApp::new().await;
    app.cleanup().await;
    seed_workouts(&app).await;

    let (status, response) = app.get("/api/v1/catalog/", None).await;
    assert_eq!(status, StatusCode::OK);

    let listing: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(listing["pagination"]["items_per_page"], 8);
}
