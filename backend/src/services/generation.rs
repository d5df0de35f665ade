//! Weekly plan generation
//!
//! Computes the user's adherence over the recent window, asks the AI
//! planner for a 7-day structure, resolves meal calories through the
//! nutrition lookup, and materializes all 7 plans in one transaction
//! so a mid-week failure never leaves a partial week behind.

use crate::clients::spoonacular::fallback_calories;
use crate::clients::{GeneratedWorkout, GenerationProfile, NutritionLookup, PlanGenerator};
use crate::error::ApiError;
use crate::repositories::{
    MealRecord, MealRepository, NewMeal, NewWorkout, PlanRepository, UserRepository,
    WorkoutRecord, WorkoutRepository,
};
use body_architect_shared::models::{Goal, PlanStatus};
use body_architect_shared::types::GeneratePlanResponse;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

const WEEK_DAYS: usize = 7;
const WINDOW_DAYS: i64 = 7;

// Macro breakdown is a placeholder until per-meal macros come from the
// nutrition provider.
const PLACEHOLDER_PROTEIN: f64 = 20.0;
const PLACEHOLDER_CARBS: f64 = 30.0;
const PLACEHOLDER_FAT: f64 = 10.0;

const DEFAULT_REPS: &str = "3 sets x 10 reps";
const DEFAULT_DURATION_MINS: i32 = 15;
const DEFAULT_CALORIES_BURNED: i32 = 150;

const LOW_ADHERENCE_THRESHOLD: f64 = 50.0;

/// Completion percentage over the recent items, None when there is
/// nothing to measure
pub(crate) fn adherence_score(completed: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(completed as f64 / total as f64 * 100.0)
}

pub(crate) fn format_adherence(adherence: Option<f64>) -> String {
    match adherence {
        Some(pct) => format!("{pct:.1}%"),
        None => "first time".to_string(),
    }
}

pub(crate) fn adjustment_note(adherence: Option<f64>) -> String {
    match adherence {
        Some(pct) if pct < LOW_ADHERENCE_THRESHOLD => {
            "We made it easier this week to help you stay consistent.".to_string()
        }
        Some(_) => "The plan was adjusted to your progress.".to_string(),
        None => "A balanced starter plan to get you going.".to_string(),
    }
}

fn workout_with_defaults(plan_id: i64, workout: GeneratedWorkout) -> NewWorkout {
    NewWorkout {
        daily_plan_id: plan_id,
        name: workout.name,
        workout_type: workout.workout_type,
        duration_mins: workout.duration_mins.unwrap_or(DEFAULT_DURATION_MINS),
        calories_burned: workout.calories_estimate.unwrap_or(DEFAULT_CALORIES_BURNED),
        reps: Some(workout.reps.unwrap_or_else(|| DEFAULT_REPS.to_string())),
        gif_url: None,
    }
}

fn count_completed(meals: &[MealRecord], workouts: &[WorkoutRecord]) -> (usize, usize) {
    let completed = meals.iter().filter(|m| m.is_completed).count()
        + workouts.iter().filter(|w| w.is_completed).count();
    (completed, meals.len() + workouts.len())
}

/// Weekly plan generation service
pub struct GenerationService;

impl GenerationService {
    /// Generate and persist a fresh 7-day plan for the user
    pub async fn generate_week(
        pool: &PgPool,
        planner: &dyn PlanGenerator,
        nutrition: Arc<dyn NutritionLookup>,
        user_id: i64,
    ) -> Result<GeneratePlanResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let profile = GenerationProfile {
            goal: user.goal.parse().unwrap_or(Goal::Maintenance),
            activity_level: user.activity_level.clone(),
        };

        let adherence = Self::recent_adherence(pool, user_id).await?;
        info!(
            user_id,
            goal = %profile.goal,
            adherence = ?adherence,
            "generating weekly plan"
        );

        let week = planner
            .generate(&profile, adherence)
            .await
            .map_err(|err| {
                warn!(user_id, error = %err, "plan generation failed");
                ApiError::Upstream("AI plan generation failed".to_string())
            })?;

        if week.weekly_plan.len() < WEEK_DAYS {
            warn!(
                user_id,
                days = week.weekly_plan.len(),
                "AI returned an incomplete week"
            );
            return Err(ApiError::Upstream(
                "AI returned an incomplete weekly plan".to_string(),
            ));
        }

        // Resolve every meal's calories before opening the transaction
        // so external latency never holds row locks.
        let mut resolved_days = Vec::with_capacity(WEEK_DAYS);
        for day in week.weekly_plan.into_iter().take(WEEK_DAYS) {
            let mut handles = Vec::with_capacity(day.meals.len());
            for meal in &day.meals {
                let nutrition = Arc::clone(&nutrition);
                let name = meal.name.clone();
                let meal_type = meal.meal_type;
                handles.push(tokio::spawn(async move {
                    match nutrition.estimate_calories(&name, meal_type).await {
                        Ok(Some(calories)) => calories,
                        Ok(None) => fallback_calories(meal_type),
                        Err(err) => {
                            warn!(meal = %name, error = %err, "nutrition lookup failed");
                            fallback_calories(meal_type)
                        }
                    }
                }));
            }

            let mut meals = Vec::with_capacity(day.meals.len());
            for (meal, handle) in day.meals.into_iter().zip(handles) {
                let calories = handle
                    .await
                    .map_err(|err| ApiError::Internal(anyhow::anyhow!(err)))?;
                meals.push((meal, calories));
            }
            resolved_days.push((meals, day.workouts));
        }

        let today = Utc::now().date_naive();
        let mut tx = pool.begin().await?;

        for (offset, (meals, workouts)) in resolved_days.into_iter().enumerate() {
            let date = today + Duration::days(offset as i64);
            let plan =
                PlanRepository::create(&mut *tx, user_id, date, PlanStatus::Active.as_str())
                    .await
                    .map_err(ApiError::Internal)?;

            for (meal, calories) in meals {
                MealRepository::insert(
                    &mut *tx,
                    &NewMeal {
                        daily_plan_id: plan.id,
                        name: meal.name,
                        meal_type: meal.meal_type.to_string(),
                        calories,
                        protein: PLACEHOLDER_PROTEIN,
                        carbs: PLACEHOLDER_CARBS,
                        fat: PLACEHOLDER_FAT,
                    },
                )
                .await
                .map_err(ApiError::Internal)?;
            }

            for workout in workouts {
                WorkoutRepository::insert(&mut *tx, &workout_with_defaults(plan.id, workout))
                    .await
                    .map_err(ApiError::Internal)?;
            }
        }

        tx.commit().await?;
        info!(user_id, "weekly plan persisted");

        Ok(GeneratePlanResponse {
            message: "Plan generated successfully".to_string(),
            previous_adherence: format_adherence(adherence),
            note: adjustment_note(adherence),
        })
    }

    /// Adherence over the most recent plans, None for new users
    async fn recent_adherence(pool: &PgPool, user_id: i64) -> Result<Option<f64>, ApiError> {
        let window = PlanRepository::recent_window(pool, user_id, WINDOW_DAYS)
            .await
            .map_err(ApiError::Internal)?;
        if window.is_empty() {
            return Ok(None);
        }

        let plan_ids: Vec<i64> = window.iter().map(|p| p.id).collect();
        let meals = MealRepository::for_plans(pool, &plan_ids)
            .await
            .map_err(ApiError::Internal)?;
        let workouts = WorkoutRepository::for_plans(pool, &plan_ids)
            .await
            .map_err(ApiError::Internal)?;

        let (completed, total) = count_completed(&meals, &workouts);
        Ok(adherence_score(completed, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_adherence_none_without_items() {
        assert_eq!(adherence_score(0, 0), None);
    }

    #[test]
    fn test_adherence_percentage() {
        assert_eq!(adherence_score(3, 6), Some(50.0));
        assert_eq!(adherence_score(6, 6), Some(100.0));
        assert_eq!(adherence_score(0, 4), Some(0.0));
    }

    #[test]
    fn test_adherence_formatting() {
        assert_eq!(format_adherence(Some(42.857)), "42.9%");
        assert_eq!(format_adherence(None), "first time");
    }

    #[test]
    fn test_notes_by_tier() {
        assert!(adjustment_note(Some(30.0)).contains("easier"));
        assert!(adjustment_note(Some(75.0)).contains("adjusted"));
        assert!(adjustment_note(None).contains("starter"));
    }

    #[test]
    fn test_workout_defaults_fill_gaps() {
        let new_workout = workout_with_defaults(
            7,
            GeneratedWorkout {
                name: "Plank".to_string(),
                reps: None,
                workout_type: "core".to_string(),
                calories_estimate: None,
                duration_mins: None,
            },
        );

        assert_eq!(new_workout.daily_plan_id, 7);
        assert_eq!(new_workout.reps.as_deref(), Some(DEFAULT_REPS));
        assert_eq!(new_workout.duration_mins, DEFAULT_DURATION_MINS);
        assert_eq!(new_workout.calories_burned, DEFAULT_CALORIES_BURNED);
    }

    #[test]
    fn test_workout_defaults_keep_provided_values() {
        let new_workout = workout_with_defaults(
            7,
            GeneratedWorkout {
                name: "Squats".to_string(),
                reps: Some("4 sets x 8 reps".to_string()),
                workout_type: "strength".to_string(),
                calories_estimate: Some(220),
                duration_mins: Some(25),
            },
        );

        assert_eq!(new_workout.reps.as_deref(), Some("4 sets x 8 reps"));
        assert_eq!(new_workout.duration_mins, 25);
        assert_eq!(new_workout.calories_burned, 220);
    }

    proptest! {
        #[test]
        fn prop_adherence_stays_in_range(completed in 0usize..=100, extra in 0usize..=100) {
            let total = completed + extra;
            if let Some(pct) = adherence_score(completed, total) {
                prop_assert!((0.0..=100.0).contains(&pct));
            } else {
                prop_assert_eq!(total, 0);
            }
        }
    }
}
