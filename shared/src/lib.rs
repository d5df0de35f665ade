//! BodyArchitect Shared Library
//!
//! This crate contains the domain enumerations and API types shared
//! between the backend and any future client crates.

pub mod models;
pub mod types;

// Re-export commonly used items
pub use models::{Goal, ItemKind, MealType, PlanStatus, Role};
pub use types::*;
