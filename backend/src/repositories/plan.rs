//! Daily plan repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool};

/// Daily plan record from database
///
/// The `total_calories_*` columns are advisory; dashboard aggregates
/// are recomputed from child rows on every read.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub total_calories_intake: i32,
    pub total_calories_burned: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const PLAN_COLUMNS: &str = "id, user_id, date, status, total_calories_intake, \
                            total_calories_burned, created_at, updated_at";

/// Daily plan repository
pub struct PlanRepository;

impl PlanRepository {
    /// Create a plan; accepts any executor so the weekly generation
    /// can run inside a single transaction
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        user_id: i64,
        date: NaiveDate,
        status: &str,
    ) -> Result<PlanRecord> {
        let plan = sqlx::query_as::<_, PlanRecord>(&format!(
            r#"
            INSERT INTO daily_plans (user_id, date, status)
            VALUES ($1, $2, $3)
            RETURNING {PLAN_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(date)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(plan)
    }

    /// All plans for a user, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<PlanRecord>> {
        let plans = sqlx::query_as::<_, PlanRecord>(&format!(
            "SELECT {PLAN_COLUMNS} FROM daily_plans WHERE user_id = $1 ORDER BY date DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(plans)
    }

    /// The user's most recent plans (up to `limit`), returned in
    /// chronological order oldest-to-newest
    pub async fn recent_window(pool: &PgPool, user_id: i64, limit: i64) -> Result<Vec<PlanRecord>> {
        let mut plans = sqlx::query_as::<_, PlanRecord>(&format!(
            "SELECT {PLAN_COLUMNS} FROM daily_plans WHERE user_id = $1 ORDER BY date DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        plans.reverse();
        Ok(plans)
    }

    /// Update a plan's status, scoped to the owner
    pub async fn update_status(
        pool: &PgPool,
        id: i64,
        user_id: i64,
        status: &str,
    ) -> Result<Option<PlanRecord>> {
        let plan = sqlx::query_as::<_, PlanRecord>(&format!(
            r#"
            UPDATE daily_plans SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {PLAN_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(plan)
    }

    /// Delete a plan, scoped to the owner (meals/workouts cascade)
    pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM daily_plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count plans currently marked active, across all users
    pub async fn count_active(pool: &PgPool) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM daily_plans WHERE status = 'active'")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
