//! Dashboard aggregation
//!
//! Admins get platform statistics; everyone else gets a weekly view
//! computed from their most recent plans. Totals only count items the
//! user marked completed, so the stored per-plan aggregates are never
//! trusted here.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::{PlanRepository, UserRepository};
use crate::services::plan::load_plans_with_items;
use body_architect_shared::models::Role;
use body_architect_shared::types::{
    AdminDashboard, AdminStatistics, DashboardResponse, DateRange, PlanResponse, RecentUser,
    TodaySummary, UserDashboard, WeeklyStats,
};
use chrono::NaiveDate;
use sqlx::PgPool;

const WINDOW_DAYS: i64 = 7;
const RECENT_USERS: i64 = 5;

/// Sum of calories across meals the user marked completed
pub(crate) fn completed_intake(plan: &PlanResponse) -> i32 {
    plan.meals
        .iter()
        .filter(|m| m.is_completed)
        .map(|m| m.calories)
        .sum()
}

/// Sum of calories across workouts the user marked completed
pub(crate) fn completed_burn(plan: &PlanResponse) -> i32 {
    plan.workouts
        .iter()
        .filter(|w| w.is_completed)
        .map(|w| w.calories_burned)
        .sum()
}

/// Chart label like "Dec 9"
pub(crate) fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn user_dashboard(plans: Vec<PlanResponse>) -> UserDashboard {
    let date_range = match (plans.first(), plans.last()) {
        (Some(first), Some(last)) => DateRange {
            start: first.date.to_string(),
            end: last.date.to_string(),
        },
        _ => DateRange {
            start: "-".to_string(),
            end: "-".to_string(),
        },
    };

    let mut weekly_stats = WeeklyStats::default();
    for plan in &plans {
        weekly_stats.labels.push(date_label(plan.date));
        weekly_stats.intake.push(completed_intake(plan));
        weekly_stats.burned.push(completed_burn(plan));
    }

    // "Today" is the first plan of the window, matching the series
    let today_plan = plans.into_iter().next();
    let today_summary = today_plan
        .as_ref()
        .map(|plan| TodaySummary {
            calories_intake: completed_intake(plan),
            calories_burned: completed_burn(plan),
        })
        .unwrap_or_default();

    UserDashboard {
        role: Role::User,
        message: "Let's crush your goals!".to_string(),
        date_range,
        weekly_stats,
        today_summary,
        today_plan,
    }
}

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    pub async fn compute(pool: &PgPool, auth: &AuthUser) -> Result<DashboardResponse, ApiError> {
        match auth.role {
            Role::Admin => Self::admin_view(pool).await,
            Role::User => Self::user_view(pool, auth.user_id).await,
        }
    }

    async fn admin_view(pool: &PgPool) -> Result<DashboardResponse, ApiError> {
        let total_users = UserRepository::count(pool).await.map_err(ApiError::Internal)?;
        let active_plans = PlanRepository::count_active(pool)
            .await
            .map_err(ApiError::Internal)?;
        let recent_users = UserRepository::recent(pool, RECENT_USERS)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|user| RecentUser {
                id: user.id,
                username: user.username,
                email: user.email,
                created_at: user.created_at,
            })
            .collect();

        Ok(DashboardResponse::Admin(AdminDashboard {
            role: Role::Admin,
            message: "Welcome Admin".to_string(),
            statistics: AdminStatistics {
                total_users,
                active_plans,
            },
            recent_users,
        }))
    }

    async fn user_view(pool: &PgPool, user_id: i64) -> Result<DashboardResponse, ApiError> {
        let window = PlanRepository::recent_window(pool, user_id, WINDOW_DAYS)
            .await
            .map_err(ApiError::Internal)?;
        let plans = load_plans_with_items(pool, window).await?;

        Ok(DashboardResponse::User(user_dashboard(plans)))
    }
}
