//! Workout repository for database operations
//!
//! Also serves the public catalog listing with search, type filter,
//! sort, and pagination.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

/// Workout record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutRecord {
    pub id: i64,
    pub daily_plan_id: i64,
    pub name: String,
    pub workout_type: String,
    pub duration_mins: i32,
    pub calories_burned: i32,
    pub reps: Option<String>,
    pub gif_url: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a workout
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub daily_plan_id: i64,
    pub name: String,
    pub workout_type: String,
    pub duration_mins: i32,
    pub calories_burned: i32,
    pub reps: Option<String>,
    pub gif_url: Option<String>,
}

/// Public catalog row (no ownership or completion data)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogRow {
    pub name: String,
    pub workout_type: String,
    pub calories_burned: i32,
    pub duration_mins: i32,
}

/// Catalog sort keys; unknown values fall back to newest-first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSort {
    CaloriesDesc,
    CaloriesAsc,
    DurationDesc,
    DurationAsc,
    Newest,
}

impl CatalogSort {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("calories_desc") => CatalogSort::CaloriesDesc,
            Some("calories_asc") => CatalogSort::CaloriesAsc,
            Some("duration_desc") => CatalogSort::DurationDesc,
            Some("duration_asc") => CatalogSort::DurationAsc,
            _ => CatalogSort::Newest,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            CatalogSort::CaloriesDesc => "calories_burned DESC",
            CatalogSort::CaloriesAsc => "calories_burned ASC",
            CatalogSort::DurationDesc => "duration_mins DESC",
            CatalogSort::DurationAsc => "duration_mins ASC",
            CatalogSort::Newest => "created_at DESC",
        }
    }
}

/// Filter for the public catalog
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub workout_type: Option<String>,
    pub sort: CatalogSort,
    pub limit: i64,
    pub offset: i64,
}

const WORKOUT_COLUMNS: &str = "id, daily_plan_id, name, workout_type, duration_mins, \
                               calories_burned, reps, gif_url, is_completed, created_at, updated_at";

/// Workout repository
pub struct WorkoutRepository;

impl WorkoutRepository {
    /// Insert a workout; accepts any executor for transactional bulk use
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        workout: &NewWorkout,
    ) -> Result<WorkoutRecord> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            r#"
            INSERT INTO workouts (daily_plan_id, name, workout_type, duration_mins,
                                  calories_burned, reps, gif_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {WORKOUT_COLUMNS}
            "#,
        ))
        .bind(workout.daily_plan_id)
        .bind(&workout.name)
        .bind(&workout.workout_type)
        .bind(workout.duration_mins)
        .bind(workout.calories_burned)
        .bind(&workout.reps)
        .bind(&workout.gif_url)
        .fetch_one(executor)
        .await?;

        Ok(record)
    }

    /// All workouts belonging to the given plans
    pub async fn for_plans(pool: &PgPool, plan_ids: &[i64]) -> Result<Vec<WorkoutRecord>> {
        let workouts = sqlx::query_as::<_, WorkoutRecord>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE daily_plan_id = ANY($1) ORDER BY id"
        ))
        .bind(plan_ids)
        .fetch_all(pool)
        .await?;

        Ok(workouts)
    }

    /// Id of the user owning the plan this workout belongs to
    pub async fn owner_of(pool: &PgPool, workout_id: i64) -> Result<Option<i64>> {
        let owner = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT dp.user_id
            FROM workouts w
            JOIN daily_plans dp ON dp.id = w.daily_plan_id
            WHERE w.id = $1
            "#,
        )
        .bind(workout_id)
        .fetch_optional(pool)
        .await?;

        Ok(owner)
    }

    /// Flip the completion flag on one workout
    pub async fn set_completed(pool: &PgPool, id: i64, is_completed: bool) -> Result<bool> {
        let result =
            sqlx::query("UPDATE workouts SET is_completed = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(is_completed)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Public catalog listing with filters, sort, and pagination
    pub async fn browse(pool: &PgPool, filter: &CatalogFilter) -> Result<(Vec<CatalogRow>, i64)> {
        let mut count_builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM workouts");
        Self::push_filters(&mut count_builder, filter);
        let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT name, workout_type, calories_burned, duration_mins FROM workouts",
        );
        Self::push_filters(&mut builder, filter);
        builder.push(" ORDER BY ").push(filter.sort.order_clause());
        builder.push(" LIMIT ").push_bind(filter.limit);
        builder.push(" OFFSET ").push_bind(filter.offset);

        let rows = builder
            .build_query_as::<CatalogRow>()
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &CatalogFilter) {
        let mut separator = " WHERE ";
        if let Some(search) = &filter.search {
            builder
                .push(separator)
                .push("name ILIKE ")
                .push_bind(format!("%{}%", search));
            separator = " AND ";
        }
        if let Some(workout_type) = &filter.workout_type {
            builder
                .push(separator)
                .push("workout_type = ")
                .push_bind(workout_type.clone());
        }
    }
}
