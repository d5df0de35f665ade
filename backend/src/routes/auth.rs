//! Authentication routes
//!
//! Registration, password login, and Google ID token login. Password
//! hashing and verification run on the blocking thread pool, and JWT
//! keys are pre-computed in AppState.

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use body_architect_shared::types::{
    AuthResponse, GoogleLoginRequest, LoginRequest, RegisterRequest, RegisterResponse,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google", post(google_login))
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let created = UserService::register(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let auth = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(auth))
}

/// Login with a Google ID token, creating the account on first use
///
/// POST /api/v1/auth/google
async fn google_login(
    State(state): State<AppState>,
    Json(req): Json<GoogleLoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let auth =
        UserService::google_login(state.db(), state.jwt(), state.google(), &req.token).await?;
    Ok(Json(auth))
}
