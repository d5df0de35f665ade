//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod meal;
pub mod plan;
pub mod user;
pub mod workout;

pub use meal::{MealRecord, MealRepository, NewMeal, UpdateMeal};
pub use plan::{PlanRecord, PlanRepository};
pub use user::{NewUser, UpdateUser, UserRecord, UserRepository};
pub use workout::{
    CatalogFilter, CatalogRow, CatalogSort, NewWorkout, WorkoutRecord, WorkoutRepository,
};
