//! Daily plan, item toggle, and meal routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::{GenerationService, PlanService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use body_architect_shared::models::ItemKind;
use body_architect_shared::types::{
    CreatePlanRequest, GeneratePlanResponse, MessageResponse, PlanResponse, ToggleItemRequest,
    UpdateMealRequest, UpdatePlanRequest,
};

/// Create plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/generate", post(generate_plan))
        .route("/:id", put(update_plan).delete(delete_plan))
}

/// Create item completion routes
pub fn item_routes() -> Router<AppState> {
    Router::new().route("/:kind/:id", patch(toggle_item))
}

/// Create meal edit routes
pub fn meal_routes() -> Router<AppState> {
    Router::new().route("/:id", put(update_meal).delete(delete_meal))
}

/// List own plans with meals and workouts, newest first
///
/// GET /api/v1/plans
async fn list_plans(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PlanResponse>>> {
    let plans = PlanService::list_plans(state.db(), auth.user_id).await?;
    Ok(Json(plans))
}

/// Create a plan manually
///
/// POST /api/v1/plans
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<PlanResponse>)> {
    let plan = PlanService::create_plan(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// Generate and persist a 7-day plan
///
/// POST /api/v1/plans/generate
async fn generate_plan(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<GeneratePlanResponse>> {
    let outcome = GenerationService::generate_week(
        state.db(),
        state.planner(),
        state.nutrition(),
        auth.user_id,
    )
    .await?;
    Ok(Json(outcome))
}

/// Update a plan's status
///
/// PUT /api/v1/plans/:id
async fn update_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<i64>,
    Json(req): Json<UpdatePlanRequest>,
) -> ApiResult<Json<PlanResponse>> {
    let plan = PlanService::update_plan(state.db(), auth.user_id, plan_id, req.status).await?;
    Ok(Json(plan))
}

/// Delete a plan and its items
///
/// DELETE /api/v1/plans/:id
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let confirmation = PlanService::delete_plan(state.db(), auth.user_id, plan_id).await?;
    Ok(Json(confirmation))
}

/// Toggle completion of a meal or workout
///
/// PATCH /api/v1/items/:kind/:id
async fn toggle_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, item_id)): Path<(String, i64)>,
    Json(req): Json<ToggleItemRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let kind: ItemKind = kind
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid item type".to_string()))?;

    let confirmation =
        PlanService::toggle_item(state.db(), auth.user_id, kind, item_id, req.is_completed)
            .await?;
    Ok(Json(confirmation))
}

/// Edit a meal within an owned plan
///
/// PUT /api/v1/meals/:id
async fn update_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meal_id): Path<i64>,
    Json(req): Json<UpdateMealRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let confirmation = PlanService::update_meal(state.db(), auth.user_id, meal_id, req).await?;
    Ok(Json(confirmation))
}

/// Delete a meal within an owned plan
///
/// DELETE /api/v1/meals/:id
async fn delete_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meal_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let confirmation = PlanService::delete_meal(state.db(), auth.user_id, meal_id).await?;
    Ok(Json(confirmation))
}
