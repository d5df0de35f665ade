//! Daily plan service: CRUD, item completion, and the ownership guard
//!
//! The ownership guard is the single place that enforces the
//! cross-entity rule: a meal/workout may only be mutated by the user
//! owning its parent plan. Handlers never re-implement the check.

use crate::error::ApiError;
use crate::repositories::{
    MealRecord, MealRepository, PlanRecord, PlanRepository, UpdateMeal, WorkoutRecord,
    WorkoutRepository,
};
use body_architect_shared::models::{ItemKind, MealType, PlanStatus};
use body_architect_shared::types::{
    CreatePlanRequest, MealResponse, MessageResponse, PlanResponse, UpdateMealRequest,
    WorkoutResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;

pub(crate) fn meal_response(meal: MealRecord) -> MealResponse {
    MealResponse {
        id: meal.id,
        daily_plan_id: meal.daily_plan_id,
        name: meal.name,
        meal_type: meal.meal_type.parse().unwrap_or(MealType::Lunch),
        calories: meal.calories,
        protein: meal.protein,
        carbs: meal.carbs,
        fat: meal.fat,
        is_completed: meal.is_completed,
    }
}

pub(crate) fn workout_response(workout: WorkoutRecord) -> WorkoutResponse {
    WorkoutResponse {
        id: workout.id,
        daily_plan_id: workout.daily_plan_id,
        name: workout.name,
        workout_type: workout.workout_type,
        duration_mins: workout.duration_mins,
        calories_burned: workout.calories_burned,
        reps: workout.reps,
        gif_url: workout.gif_url,
        is_completed: workout.is_completed,
    }
}

pub(crate) fn plan_response(
    plan: PlanRecord,
    meals: Vec<MealRecord>,
    workouts: Vec<WorkoutRecord>,
) -> PlanResponse {
    PlanResponse {
        id: plan.id,
        user_id: plan.user_id,
        date: plan.date,
        status: plan.status.parse().unwrap_or(PlanStatus::Active),
        total_calories_intake: plan.total_calories_intake,
        total_calories_burned: plan.total_calories_burned,
        meals: meals.into_iter().map(meal_response).collect(),
        workouts: workouts.into_iter().map(workout_response).collect(),
    }
}

/// Attach child rows to their plans, preserving plan order
pub(crate) async fn load_plans_with_items(
    pool: &PgPool,
    plans: Vec<PlanRecord>,
) -> Result<Vec<PlanResponse>, ApiError> {
    let plan_ids: Vec<i64> = plans.iter().map(|p| p.id).collect();

    let mut meals_by_plan: HashMap<i64, Vec<MealRecord>> = HashMap::new();
    for meal in MealRepository::for_plans(pool, &plan_ids)
        .await
        .map_err(ApiError::Internal)?
    {
        meals_by_plan.entry(meal.daily_plan_id).or_default().push(meal);
    }

    let mut workouts_by_plan: HashMap<i64, Vec<WorkoutRecord>> = HashMap::new();
    for workout in WorkoutRepository::for_plans(pool, &plan_ids)
        .await
        .map_err(ApiError::Internal)?
    {
        workouts_by_plan
            .entry(workout.daily_plan_id)
            .or_default()
            .push(workout);
    }

    Ok(plans
        .into_iter()
        .map(|plan| {
            let meals = meals_by_plan.remove(&plan.id).unwrap_or_default();
            let workouts = workouts_by_plan.remove(&plan.id).unwrap_or_default();
            plan_response(plan, meals, workouts)
        })
        .collect())
}

/// Daily plan service
pub struct PlanService;

impl PlanService {
    /// Reusable ownership guard for completable items
    ///
    /// NotFound when the item does not exist, Forbidden when its
    /// parent plan belongs to someone else. Admins get no special
    /// treatment here; plans are strictly personal.
    pub async fn ensure_item_owner(
        pool: &PgPool,
        kind: ItemKind,
        item_id: i64,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let owner = match kind {
            ItemKind::Meal => MealRepository::owner_of(pool, item_id).await,
            ItemKind::Workout => WorkoutRepository::owner_of(pool, item_id).await,
        }
        .map_err(ApiError::Internal)?;

        match owner {
            None => Err(ApiError::NotFound("Data not found".to_string())),
            Some(owner_id) if owner_id != user_id => {
                Err(ApiError::Forbidden("You are not authorized".to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    /// List the user's plans with their items, newest first
    pub async fn list_plans(pool: &PgPool, user_id: i64) -> Result<Vec<PlanResponse>, ApiError> {
        let plans = PlanRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        load_plans_with_items(pool, plans).await
    }

    /// Create a plan manually (defaults: today, active)
    pub async fn create_plan(
        pool: &PgPool,
        user_id: i64,
        req: CreatePlanRequest,
    ) -> Result<PlanResponse, ApiError> {
        let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
        let status = req.status.unwrap_or(PlanStatus::Active);

        let plan = PlanRepository::create(pool, user_id, date, status.as_str())
            .await
            .map_err(ApiError::Internal)?;

        Ok(plan_response(plan, Vec::new(), Vec::new()))
    }

    /// Update a plan's status, scoped to the requester
    pub async fn update_plan(
        pool: &PgPool,
        user_id: i64,
        plan_id: i64,
        status: PlanStatus,
    ) -> Result<PlanResponse, ApiError> {
        let plan = PlanRepository::update_status(pool, plan_id, user_id, status.as_str())
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Plan not found".to_string()))?;

        let mut with_items = load_plans_with_items(pool, vec![plan]).await?;
        Ok(with_items.remove(0))
    }

    /// Delete a plan and (by cascade) its items
    pub async fn delete_plan(
        pool: &PgPool,
        user_id: i64,
        plan_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        let deleted = PlanRepository::delete(pool, plan_id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Plan not found".to_string()));
        }

        Ok(MessageResponse {
            message: "Plan deleted successfully".to_string(),
        })
    }

    /// Toggle completion on a meal or workout
    ///
    /// Plan aggregate totals are deliberately not touched here; the
    /// dashboard recomputes from child rows on every read.
    pub async fn toggle_item(
        pool: &PgPool,
        user_id: i64,
        kind: ItemKind,
        item_id: i64,
        is_completed: bool,
    ) -> Result<MessageResponse, ApiError> {
        Self::ensure_item_owner(pool, kind, item_id, user_id).await?;

        let updated = match kind {
            ItemKind::Meal => MealRepository::set_completed(pool, item_id, is_completed).await,
            ItemKind::Workout => WorkoutRepository::set_completed(pool, item_id, is_completed).await,
        }
        .map_err(ApiError::Internal)?;

        if !updated {
            return Err(ApiError::NotFound("Data not found".to_string()));
        }

        Ok(MessageResponse {
            message: "Status updated".to_string(),
        })
    }

    /// Edit a meal's content, gated by the ownership guard
    pub async fn update_meal(
        pool: &PgPool,
        user_id: i64,
        meal_id: i64,
        req: UpdateMealRequest,
    ) -> Result<MessageResponse, ApiError> {
        Self::ensure_item_owner(pool, ItemKind::Meal, meal_id, user_id).await?;

        let updates = UpdateMeal {
            name: req.name,
            meal_type: req.meal_type.map(|t| t.to_string()),
            calories: req.calories,
            protein: req.protein,
            carbs: req.carbs,
            fat: req.fat,
        };

        MealRepository::update(pool, meal_id, updates)
            .await
            .map_err(ApiError::Internal)?;

        Ok(MessageResponse {
            message: "Meal updated".to_string(),
        })
    }

    /// Delete a meal, gated by the ownership guard
    pub async fn delete_meal(
        pool: &PgPool,
        user_id: i64,
        meal_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        Self::ensure_item_owner(pool, ItemKind::Meal, meal_id, user_id).await?;

        MealRepository::delete(pool, meal_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(MessageResponse {
            message: "Meal deleted".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn plan(id: i64) -> PlanRecord {
        PlanRecord {
            id,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 12, 9).unwrap(),
            status: "active".to_string(),
            total_calories_intake: 0,
            total_calories_burned: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn meal(id: i64, plan_id: i64) -> MealRecord {
        MealRecord {
            id,
            daily_plan_id: plan_id,
            name: "Salad".to_string(),
            meal_type: "lunch".to_string(),
            calories: 300,
            protein: 20.0,
            carbs: 30.0,
            fat: 10.0,
            is_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_response_keeps_children() {
        let response = plan_response(plan(1), vec![meal(10, 1), meal(11, 1)], Vec::new());
        assert_eq!(response.meals.len(), 2);
        assert!(response.workouts.is_empty());
        assert_eq!(response.status, PlanStatus::Active);
    }

    #[test]
    fn test_meal_response_parses_type() {
        let response = meal_response(MealRecord {
            meal_type: "breakfast".to_string(),
            ..meal(1, 1)
        });
        assert_eq!(response.meal_type, MealType::Breakfast);
    }
}
