//! Spoonacular nutrition lookup client
//!
//! Estimates calories for a named meal via the guessNutrition
//! endpoint. Lookups are best-effort: the plan generator falls back to
//! a randomized type-appropriate band when no estimate comes back.

use super::NutritionLookup;
use crate::config::SpoonacularConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use body_architect_shared::models::MealType;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;

#[derive(Deserialize)]
struct GuessNutritionResponse {
    calories: Option<NutrientValue>,
}

#[derive(Deserialize)]
struct NutrientValue {
    value: f64,
}

/// Spoonacular-backed nutrition lookup
pub struct SpoonacularClient {
    http: reqwest::Client,
    config: SpoonacularConfig,
}

impl SpoonacularClient {
    pub fn new(http: reqwest::Client, config: SpoonacularConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl NutritionLookup for SpoonacularClient {
    async fn estimate_calories(&self, name: &str, meal_type: MealType) -> Result<Option<i32>> {
        let url = format!("{}/recipes/guessNutrition", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("title", name),
                ("apiKey", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .context("Spoonacular request failed")?;

        if !response.status().is_success() {
            warn!(
                meal = name,
                %meal_type,
                status = %response.status(),
                "Nutrition lookup returned non-success status"
            );
            return Ok(None);
        }

        let payload: GuessNutritionResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!(meal = name, error = %e, "Nutrition lookup returned unparseable body");
                return Ok(None);
            }
        };

        let calories = payload
            .calories
            .map(|c| c.value.round() as i32)
            .filter(|c| *c > 0);

        Ok(calories)
    }
}

/// Randomized type-appropriate calorie estimate used when the lookup
/// fails or returns nothing
///
/// Breakfast draws from a lower band than lunch/dinner, so callers can
/// only assert the band, never an exact number.
pub fn fallback_calories(meal_type: MealType) -> i32 {
    let mut rng = rand::thread_rng();
    match meal_type {
        MealType::Breakfast => rng.gen_range(300..=500),
        MealType::Lunch | MealType::Dinner => rng.gen_range(450..=700),
    }
}
