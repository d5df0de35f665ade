//! API request and response types

use crate::models::{Goal, MealType, PlanStatus, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 5, max = 20, message = "Password must be 5-20 characters"))]
    pub password: String,
    #[validate(range(min = 1, message = "Age must be at least 1"))]
    pub age: i32,
    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub goal: Goal,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub message: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Google OAuth login request carrying the raw ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub token: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub role: Role,
    pub username: String,
}

/// User profile (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub goal: Goal,
    pub tdee: i32,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    #[validate(range(min = 1, message = "Age must be at least 1"))]
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<Goal>,
    pub tdee: Option<i32>,
}

/// Admin-side user update (may also change email and role)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdminUserUpdateRequest {
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    #[validate(range(min = 1, message = "Age must be at least 1"))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<Goal>,
    pub tdee: Option<i32>,
}

/// Generic confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Plan Types
// ============================================================================

/// Daily plan with its meals and workouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub status: PlanStatus,
    pub total_calories_intake: i32,
    pub total_calories_burned: i32,
    pub meals: Vec<MealResponse>,
    pub workouts: Vec<WorkoutResponse>,
}

/// Meal within a daily plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealResponse {
    pub id: i64,
    pub daily_plan_id: i64,
    pub name: String,
    pub meal_type: MealType,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub is_completed: bool,
}

/// Workout within a daily plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: i64,
    pub daily_plan_id: i64,
    pub name: String,
    pub workout_type: String,
    pub duration_mins: i32,
    pub calories_burned: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    pub is_completed: bool,
}

/// Manual plan creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub date: Option<NaiveDate>,
    pub status: Option<PlanStatus>,
}

/// Plan status update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlanRequest {
    pub status: PlanStatus,
}

/// Completion toggle request for a meal or workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleItemRequest {
    pub is_completed: bool,
}

/// Partial meal edit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub meal_type: Option<MealType>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Confirmation returned by the weekly plan generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanResponse {
    pub message: String,
    /// Prior adherence formatted to one decimal place, or "first time"
    pub previous_adherence: String,
    pub note: String,
}

// ============================================================================
// Dashboard Types
// ============================================================================

/// Role-shaped dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardResponse {
    Admin(AdminDashboard),
    User(UserDashboard),
}

/// Admin view: aggregate counts, no per-user plan data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub role: Role,
    pub message: String,
    pub statistics: AdminStatistics,
    pub recent_users: Vec<RecentUser>,
}

/// Aggregate user/plan counts for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStatistics {
    pub total_users: i64,
    pub active_plans: i64,
}

/// Recently registered user summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Regular user view: weekly series plus today's plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDashboard {
    pub role: Role,
    pub message: String,
    pub date_range: DateRange,
    pub weekly_stats: WeeklyStats,
    pub today_summary: TodaySummary,
    /// The chronologically first plan of the window, null when none exist
    pub today_plan: Option<PlanResponse>,
}

/// Window boundaries, "-" when the user has no plans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Three parallel series ordered oldest-to-newest, for charting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub labels: Vec<String>,
    pub intake: Vec<i32>,
    pub burned: Vec<i32>,
}

/// Completed-only calorie totals for the "today" plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodaySummary {
    pub calories_intake: i32,
    pub calories_burned: i32,
}

// ============================================================================
// Public Catalog Types
// ============================================================================

/// Query parameters for the public workout catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CatalogQuery {
    /// Clamp pagination to sane bounds (page >= 1, 1 <= limit <= 50)
    pub fn normalize(self) -> Self {
        Self {
            page: Some(self.page.unwrap_or(1).max(1)),
            limit: Some(self.limit.unwrap_or(8).clamp(1, 50)),
            ..self
        }
    }
}

/// Catalog entry (public subset of a workout row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub calories_burned: i32,
    pub duration_mins: i32,
}

/// Paginated catalog response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub data: Vec<CatalogEntry>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub items_per_page: u32,
}

impl PaginationMeta {
    pub fn new(total_items: i64, current_page: u32, items_per_page: u32) -> Self {
        let per_page = i64::from(items_per_page.max(1));
        Self {
            total_items,
            total_pages: (total_items + per_page - 1) / per_page,
            current_page,
            items_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            username: "tester".to_string(),
            email: "test@mail.com".to_string(),
            password: "password123".to_string(),
            age: 25,
            gender: "male".to_string(),
            height: 170.0,
            weight: 60.0,
            activity_level: "moderate".to_string(),
            goal: Goal::MuscleBuild,
        }
    }

    #[test]
    fn test_register_request_validates() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let req = RegisterRequest {
            password: "abc".to_string(),
            ..valid_register()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_zero_age() {
        let req = RegisterRequest {
            age: 0,
            ..valid_register()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_catalog_query_normalize_defaults() {
        let q = CatalogQuery::default().normalize();
        assert_eq!(q.page, Some(1));
        assert_eq!(q.limit, Some(8));
    }

    #[test]
    fn test_catalog_query_normalize_clamps() {
        let q = CatalogQuery {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        }
        .normalize();
        assert_eq!(q.page, Some(1));
        assert_eq!(q.limit, Some(50));
    }

    #[test]
    fn test_pagination_meta_rounds_pages_up() {
        let meta = PaginationMeta::new(17, 1, 8);
        assert_eq!(meta.total_pages, 3);
        let empty = PaginationMeta::new(0, 1, 8);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_dashboard_serializes_untagged() {
        let dash = DashboardResponse::Admin(AdminDashboard {
            role: Role::Admin,
            message: "Welcome Admin".to_string(),
            statistics: AdminStatistics {
                total_users: 3,
                active_plans: 1,
            },
            recent_users: vec![],
        });
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["statistics"]["total_users"], 3);
    }
}
