//! User service for authentication, profiles, and admin management
//!
//! Password hashing and verification run on the blocking thread pool;
//! the JWT service is passed by reference with pre-computed keys.

use crate::auth::{JwtService, PasswordService};
use crate::clients::GoogleTokenVerifier;
use crate::error::{validation_error, ApiError};
use crate::repositories::{NewUser, UpdateUser, UserRecord, UserRepository};
use body_architect_shared::models::{Goal, Role};
use body_architect_shared::types::{
    AdminUserUpdateRequest, AuthResponse, MessageResponse, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, UserProfile,
};
use rand::Rng;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// Default energy expenditure assigned at registration; refined later
/// through profile updates
const DEFAULT_TDEE: i32 = 2000;

/// Convert a database record into the public profile shape
pub(crate) fn to_profile(user: UserRecord) -> UserProfile {
    UserProfile {
        id: user.id,
        email: user.email,
        username: user.username,
        role: user.role.parse().unwrap_or(Role::User),
        age: user.age,
        gender: user.gender,
        height: user.height,
        weight: user.weight,
        activity_level: user.activity_level,
        goal: user.goal.parse().unwrap_or(Goal::Maintenance),
        tdee: user.tdee,
        created_at: user.created_at,
    }
}

/// User service for account operations
pub struct UserService;

impl UserService {
    /// Register a new user
    pub async fn register(
        pool: &PgPool,
        req: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        req.validate().map_err(|e| validation_error(&e))?;

        if UserRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Validation("Email already registered".to_string()));
        }

        if UserRepository::username_exists(pool, &req.username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Validation("Username already taken".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            &NewUser {
                email: req.email.clone(),
                username: req.username.clone(),
                password_hash,
                role: Role::User.to_string(),
                age: req.age,
                gender: req.gender.clone(),
                height: req.height,
                weight: req.weight,
                activity_level: req.activity_level.clone(),
                goal: req.goal.to_string(),
                tdee: DEFAULT_TDEE,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(user_id = user.id, "New user registered");

        Ok(RegisterResponse {
            id: user.id,
            email: user.email,
            message: "Register success".to_string(),
        })
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::BadRequest("Email/Password required".to_string()));
        }

        let user = UserRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_auth(jwt, &user)
    }

    /// Login via a Google ID token, creating the account on first use
    pub async fn google_login(
        pool: &PgPool,
        jwt: &JwtService,
        verifier: &dyn GoogleTokenVerifier,
        token: &str,
    ) -> Result<AuthResponse, ApiError> {
        let identity = verifier
            .verify(token)
            .await
            .map_err(|_| ApiError::Unauthorized("Invalid Google Token".to_string()))?;

        let existing = UserRepository::find_by_email(pool, &identity.email)
            .await
            .map_err(ApiError::Internal)?;

        let user = match existing {
            Some(user) => user,
            None => {
                // Unguessable local credential; Google accounts always
                // authenticate through token verification
                let shadow_password = format!(
                    "google_{}_{}",
                    identity.subject,
                    rand::thread_rng().gen::<u64>()
                );
                let password_hash = PasswordService::hash_async(shadow_password)
                    .await
                    .map_err(ApiError::Internal)?;

                let user = UserRepository::create(
                    pool,
                    &NewUser {
                        email: identity.email.clone(),
                        username: identity.name.clone(),
                        password_hash,
                        role: Role::User.to_string(),
                        age: 20,
                        gender: "male".to_string(),
                        height: 170.0,
                        weight: 60.0,
                        activity_level: "moderate".to_string(),
                        goal: Goal::Maintenance.to_string(),
                        tdee: DEFAULT_TDEE,
                    },
                )
                .await
                .map_err(ApiError::Internal)?;

                info!(user_id = user.id, "New user created via Google login");
                user
            }
        };

        Self::issue_auth(jwt, &user)
    }

    fn issue_auth(jwt: &JwtService, user: &UserRecord) -> Result<AuthResponse, ApiError> {
        let role = user.role.parse().unwrap_or(Role::User);
        let access_token = jwt
            .issue_token(user.id, &user.email, role)
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            access_token,
            role,
            username: user.username.clone(),
        })
    }

    /// Get a user's own profile
    pub async fn get_profile(pool: &PgPool, user_id: i64) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(to_profile(user))
    }

    /// Update a user's own physiology profile
    pub async fn update_profile(
        pool: &PgPool,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        req.validate().map_err(|e| validation_error(&e))?;

        let updates = UpdateUser {
            username: req.username,
            age: req.age,
            weight: req.weight,
            height: req.height,
            activity_level: req.activity_level,
            goal: req.goal.map(|g| g.to_string()),
            tdee: req.tdee,
            ..Default::default()
        };

        let user = UserRepository::update(pool, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(to_profile(user))
    }

    /// Admin: list all users, newest first
    pub async fn admin_list(pool: &PgPool) -> Result<Vec<UserProfile>, ApiError> {
        let users = UserRepository::list_all(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(users.into_iter().map(to_profile).collect())
    }

    /// Admin: update any user's account
    pub async fn admin_update(
        pool: &PgPool,
        user_id: i64,
        req: AdminUserUpdateRequest,
    ) -> Result<UserProfile, ApiError> {
        req.validate().map_err(|e| validation_error(&e))?;

        let updates = UpdateUser {
            email: req.email,
            username: req.username,
            role: req.role.map(|r| r.to_string()),
            age: req.age,
            gender: req.gender,
            weight: req.weight,
            height: req.height,
            activity_level: req.activity_level,
            goal: req.goal.map(|g| g.to_string()),
            tdee: req.tdee,
        };

        let user = UserRepository::update(pool, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(to_profile(user))
    }

    /// Admin: delete a user (plans cascade away with the account)
    pub async fn admin_delete(pool: &PgPool, user_id: i64) -> Result<MessageResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        UserRepository::delete(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id, "User deleted by admin");

        Ok(MessageResponse {
            message: format!("User {} has been deleted", user.email),
        })
    }
}
