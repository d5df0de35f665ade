//! Admin user management routes
//!
//! Every handler takes the `AdminUser` extractor, so user-role tokens
//! are rejected with 403 before any handler body runs.

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use body_architect_shared::types::{AdminUserUpdateRequest, MessageResponse, UserProfile};

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(delete_user))
}

/// List every user, newest first
///
/// GET /api/v1/admin/users
async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = UserService::admin_list(state.db()).await?;
    Ok(Json(users))
}

/// Update any user's account, role included
///
/// PUT /api/v1/admin/users/:id
async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
    Json(req): Json<AdminUserUpdateRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = UserService::admin_update(state.db(), user_id, req).await?;
    Ok(Json(profile))
}

/// Delete a user and (by cascade) their plans
///
/// DELETE /api/v1/admin/users/:id
async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let confirmation = UserService::admin_delete(state.db(), user_id).await?;
    Ok(Json(confirmation))
}
