//! Shared application state

use crate::auth::JwtService;
use crate::clients::{
    GeminiPlanGenerator, GoogleTokenVerifier, GoogleVerifier, NutritionLookup, PlanGenerator,
    SpoonacularClient,
};
use crate::config::AppConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    db: PgPool,
    config: Arc<AppConfig>,
    jwt: JwtService,
    planner: Arc<dyn PlanGenerator>,
    nutrition: Arc<dyn NutritionLookup>,
    google: Arc<dyn GoogleTokenVerifier>,
}

impl AppState {
    /// Wire up production clients over a shared HTTP connection pool
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        let planner = Arc::new(GeminiPlanGenerator::new(http.clone(), config.gemini.clone()));
        let nutrition = Arc::new(SpoonacularClient::new(
            http.clone(),
            config.spoonacular.clone(),
        ));
        let google = Arc::new(GoogleVerifier::new(http, config.google.clone()));

        Self {
            db,
            config: Arc::new(config),
            jwt,
            planner,
            nutrition,
            google,
        }
    }

    /// Build state with injected clients, for tests
    pub fn with_clients(
        db: PgPool,
        config: AppConfig,
        planner: Arc<dyn PlanGenerator>,
        nutrition: Arc<dyn NutritionLookup>,
        google: Arc<dyn GoogleTokenVerifier>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        Self {
            db,
            config: Arc::new(config),
            jwt,
            planner,
            nutrition,
            google,
        }
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub fn planner(&self) -> &dyn PlanGenerator {
        self.planner.as_ref()
    }

    pub fn nutrition(&self) -> Arc<dyn NutritionLookup> {
        Arc::clone(&self.nutrition)
    }

    pub fn google(&self) -> &dyn GoogleTokenVerifier {
        self.google.as_ref()
    }
}
