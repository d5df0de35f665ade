//! Meal repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

/// Meal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealRecord {
    pub id: i64,
    pub daily_plan_id: i64,
    pub name: String,
    pub meal_type: String,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a meal
#[derive(Debug, Clone)]
pub struct NewMeal {
    pub daily_plan_id: i64,
    pub name: String,
    pub meal_type: String,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Input for editing a meal, None fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateMeal {
    pub name: Option<String>,
    pub meal_type: Option<String>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

const MEAL_COLUMNS: &str = "id, daily_plan_id, name, meal_type, calories, protein, carbs, fat, \
                            is_completed, created_at, updated_at";

/// Meal repository
pub struct MealRepository;

impl MealRepository {
    /// Insert a meal; accepts any executor for transactional bulk use
    pub async fn insert<'e>(executor: impl PgExecutor<'e>, meal: &NewMeal) -> Result<MealRecord> {
        let record = sqlx::query_as::<_, MealRecord>(&format!(
            r#"
            INSERT INTO meals (daily_plan_id, name, meal_type, calories, protein, carbs, fat)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MEAL_COLUMNS}
            "#,
        ))
        .bind(meal.daily_plan_id)
        .bind(&meal.name)
        .bind(&meal.meal_type)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.fat)
        .fetch_one(executor)
        .await?;

        Ok(record)
    }

    /// All meals belonging to the given plans
    pub async fn for_plans(pool: &PgPool, plan_ids: &[i64]) -> Result<Vec<MealRecord>> {
        let meals = sqlx::query_as::<_, MealRecord>(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE daily_plan_id = ANY($1) ORDER BY id"
        ))
        .bind(plan_ids)
        .fetch_all(pool)
        .await?;

        Ok(meals)
    }

    /// Id of the user owning the plan this meal belongs to
    pub async fn owner_of(pool: &PgPool, meal_id: i64) -> Result<Option<i64>> {
        let owner = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT dp.user_id
            FROM meals m
            JOIN daily_plans dp ON dp.id = m.daily_plan_id
            WHERE m.id = $1
            "#,
        )
        .bind(meal_id)
        .fetch_optional(pool)
        .await?;

        Ok(owner)
    }

    /// Flip the completion flag on one meal
    pub async fn set_completed(pool: &PgPool, id: i64, is_completed: bool) -> Result<bool> {
        let result =
            sqlx::query("UPDATE meals SET is_completed = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(is_completed)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Edit a meal's content fields
    pub async fn update(pool: &PgPool, id: i64, updates: UpdateMeal) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE meals SET
                name = COALESCE($2, name),
                meal_type = COALESCE($3, meal_type),
                calories = COALESCE($4, calories),
                protein = COALESCE($5, protein),
                carbs = COALESCE($6, carbs),
                fat = COALESCE($7, fat),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.meal_type)
        .bind(updates.calories)
        .bind(updates.protein)
        .bind(updates.carbs)
        .bind(updates.fat)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a single meal
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
