//! Dashboard route

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::DashboardService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use body_architect_shared::types::DashboardResponse;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Role-shaped dashboard view
///
/// GET /api/v1/dashboard
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let view = DashboardService::compute(state.db(), &auth).await?;
    Ok(Json(view))
}
