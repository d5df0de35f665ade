//! Business logic layer between route handlers and repositories

pub mod catalog;
pub mod dashboard;
pub mod generation;
pub mod plan;
pub mod user;

pub use catalog::CatalogService;
pub use dashboard::DashboardService;
pub use generation::GenerationService;
pub use plan::PlanService;
pub use user::UserService;
