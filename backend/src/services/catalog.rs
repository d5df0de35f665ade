//! Public workout catalog

use crate::error::ApiError;
use crate::repositories::{CatalogFilter, CatalogSort, WorkoutRepository};
use body_architect_shared::types::{CatalogEntry, CatalogQuery, CatalogResponse, PaginationMeta};
use sqlx::PgPool;

/// Catalog service
pub struct CatalogService;

impl CatalogService {
    /// Browse workouts with search, type filter, sort, and pagination
    pub async fn browse(pool: &PgPool, query: CatalogQuery) -> Result<CatalogResponse, ApiError> {
        let query = query.normalize();
        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(8);

        let filter = CatalogFilter {
            search: query.search,
            workout_type: query.workout_type,
            sort: CatalogSort::parse(query.sort.as_deref()),
            limit: i64::from(limit),
            offset: i64::from(page - 1) * i64::from(limit),
        };

        let (rows, total) = WorkoutRepository::browse(pool, &filter)
            .await
            .map_err(ApiError::Internal)?;

        Ok(CatalogResponse {
            data: rows
                .into_iter()
                .map(|row| CatalogEntry {
                    name: row.name,
                    workout_type: row.workout_type,
                    calories_burned: row.calories_burned,
                    duration_mins: row.duration_mins,
                })
                .collect(),
            pagination: PaginationMeta::new(total, page, limit),
        })
    }
}
