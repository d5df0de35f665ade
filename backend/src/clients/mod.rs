//! External service clients
//!
//! Each third-party collaborator sits behind an object-safe trait so
//! handlers receive injected client handles through AppState instead
//! of module-level singletons, and tests can substitute stubs.

pub mod gemini;
pub mod google;
pub mod spoonacular;

pub use gemini::GeminiPlanGenerator;
pub use google::GoogleVerifier;
pub use spoonacular::SpoonacularClient;

use anyhow::Result;
use async_trait::async_trait;
use body_architect_shared::models::{Goal, MealType};
use serde::{Deserialize, Serialize};

/// Profile slice that parameterizes plan generation
#[derive(Debug, Clone)]
pub struct GenerationProfile {
    pub goal: Goal,
    pub activity_level: String,
}

/// AI-returned weekly structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWeek {
    pub weekly_plan: Vec<GeneratedDay>,
}

/// One AI-returned day entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDay {
    pub day_number: u8,
    #[serde(default)]
    pub theme_title: Option<String>,
    pub meals: Vec<GeneratedMeal>,
    pub workouts: Vec<GeneratedWorkout>,
}

/// AI-suggested meal (calories are resolved via the nutrition lookup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMeal {
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
}

/// AI-suggested workout with optional detail fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    pub name: String,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(default)]
    pub calories_estimate: Option<i32>,
    #[serde(default)]
    pub duration_mins: Option<i32>,
}

/// Weekly plan generator (Gemini in production)
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generate a 7-day plan for the profile; `adherence` is the prior
    /// week's completion percentage, None for a first-time user.
    async fn generate(
        &self,
        profile: &GenerationProfile,
        adherence: Option<f64>,
    ) -> Result<GeneratedWeek>;
}

/// Per-meal calorie estimation (Spoonacular in production)
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Ok(None) when the lookup produced no usable estimate
    async fn estimate_calories(&self, name: &str, meal_type: MealType) -> Result<Option<i32>>;
}

/// Identity extracted from a verified Google ID token
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    pub subject: String,
    pub email: String,
    pub name: String,
}

/// Google ID token verification
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity>;
}
