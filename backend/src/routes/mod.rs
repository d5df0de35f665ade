//! Route definitions for the Body Architect API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod admin;
mod auth;
mod catalog;
mod dashboard;
mod health;
mod plans;
mod profile;

#[cfg(test)]
mod auth_tests;

pub use admin::admin_routes;
pub use auth::auth_routes;
pub use catalog::catalog_routes;
pub use dashboard::dashboard_routes;
pub use plans::{item_routes, meal_routes, plan_routes};
pub use profile::profile_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Body Architect API v1" }))
        .nest("/catalog", catalog::catalog_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/plans", plans::plan_routes())
        .nest("/items", plans::item_routes())
        .nest("/meals", plans::meal_routes())
        .nest("/admin", admin::admin_routes())
}
