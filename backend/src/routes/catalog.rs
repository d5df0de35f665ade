//! Public workout catalog routes

use crate::error::ApiResult;
use crate::services::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use body_architect_shared::types::{CatalogQuery, CatalogResponse};

/// Create catalog routes (no auth required)
pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/", get(browse))
}

/// Browse the workout catalog
///
/// GET /api/v1/catalog?search=&type=&sort=&page=&limit=
async fn browse(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<CatalogResponse>> {
    let listing = CatalogService::browse(state.db(), query).await?;
    Ok(Json(listing))
}
