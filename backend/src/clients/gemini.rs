//! Gemini plan generation client
//!
//! Builds the coaching prompt (goal-specific daily themes plus an
//! adherence feedback sentence), calls the `generateContent` endpoint,
//! and parses the JSON weekly plan out of the response text. The model
//! sometimes wraps its JSON in markdown code fences despite the JSON
//! mime type, so the parser strips them first.

use super::{GeneratedWeek, GenerationProfile, PlanGenerator};
use crate::config::GeminiConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use body_architect_shared::models::Goal;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Seven daily workout themes per training goal
fn weekly_themes(goal: Goal) -> [&'static str; 7] {
    match goal {
        Goal::MuscleBuild => [
            "Push Day (Chest, Shoulders, Triceps)",
            "Pull Day (Back, Biceps, Forearms)",
            "Leg Day (Quads, Hamstrings, Calves)",
            "Active Recovery (Yoga/Light Cardio)",
            "Upper Body Composite",
            "Lower Body Composite",
            "Rest & Mobility",
        ],
        Goal::WeightLoss => [
            "HIIT Cardio",
            "Full Body Strength Circuit",
            "Steady State Cardio",
            "Core & Abs Blaster",
            "Tabata Style",
            "Functional Movement",
            "Active Recovery",
        ],
        // Endurance has no dedicated split table; it trains on the
        // maintenance themes like the default case.
        Goal::Maintenance | Goal::Endurance => [
            "Total Body Strength",
            "Endurance Cardio",
            "Functional Mobility",
            "Core Stability",
            "Strength & Conditioning",
            "Outdoor Activity",
            "Restorative Yoga",
        ],
    }
}

/// Adherence tier sentence embedded in the prompt
///
/// Thresholds are advisory prompt context only; the raw percentage is
/// never turned into a structural difficulty parameter.
fn feedback_context(adherence: Option<f64>) -> String {
    match adherence {
        Some(pct) if pct < 50.0 => {
            format!("User struggled last week ({:.1}%). REDUCE intensity.", pct)
        }
        Some(pct) if pct > 85.0 => {
            format!("User did great ({:.1}%). INCREASE intensity.", pct)
        }
        Some(pct) => format!("User is consistent ({:.1}%). Keep momentum.", pct),
        None => "New User. Balanced plan.".to_string(),
    }
}

/// Build the full generation prompt
fn build_prompt(profile: &GenerationProfile, adherence: Option<f64>) -> String {
    let themes = weekly_themes(profile.goal);
    let numbered_themes = themes
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}: {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"Role: Fitness Coach.
Profile: Goal '{goal}', Level '{level}'.
Context: {context}

Task: Create a 7-DAY Workout & Meal Plan.

Daily Themes:
    {themes}

Requirements:
- 3 Meals (Breakfast, Lunch, Dinner) per day.
- 3 Exercises (Name, Reps, Type) per day.

Output JSON Schema:
{{
  "weekly_plan": [
    {{
      "day_number": 1,
      "theme_title": "{first_theme}",
      "meals": [{{"name": "string", "type": "breakfast"}}, ...],
      "workouts": [{{"name": "string", "reps": "string", "type": "string", "calories_estimate": 0}}, ...]
    }}
    ... (repeat for 7 days)
  ]
}}"#,
        goal = profile.goal,
        level = profile.activity_level,
        context = feedback_context(adherence),
        themes = numbered_themes,
        first_theme = themes[0],
    )
}

/// Strip optional markdown code fences and parse the weekly plan
fn parse_weekly_plan(text: &str) -> Result<GeneratedWeek> {
    let cleaned = text
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    serde_json::from_str(&cleaned).context("AI response is not a valid weekly plan")
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: String,
}

/// Gemini-backed plan generator
pub struct GeminiPlanGenerator {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiPlanGenerator {
    pub fn new(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl PlanGenerator for GeminiPlanGenerator {
    async fn generate(
        &self,
        profile: &GenerationProfile,
        adherence: Option<f64>,
    ) -> Result<GeneratedWeek> {
        let prompt = build_prompt(profile, adherence);
        debug!(goal = %profile.goal, has_adherence = adherence.is_some(), "Requesting plan generation");

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Gemini returned status {}", response.status());
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .context("Gemini response is not valid JSON")?;

        let text = payload
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .context("Gemini response contains no candidates")?;

        parse_weekly_plan(text)
    }
}
