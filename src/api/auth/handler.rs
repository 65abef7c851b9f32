//! Staff authentication handlers

use axum::{extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserLogin};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: LoginUser,
}

#[derive(Serialize)]
pub struct LoginUser {
    pub id: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
}

/// POST /api/auth/register - create a staff account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<RegisterResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload, password_hash).await?;

    let user_id = user
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("user came back without an id"))?;

    tracing::info!(user = %user.username, "staff account registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// POST /api/auth/login - exchange credentials for a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db.clone());

    // Same error for unknown user and wrong password
    let user = repo
        .find_by_username(&payload.username)
        .await?
        .filter(|u| verify_password(&payload.password, &u.password_hash))
        .ok_or_else(|| AppError::validation("Invalid username or password"))?;

    let access_token = state
        .jwt
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        user: LoginUser {
            id: user.id.map(|id| id.to_string()).unwrap_or_default(),
            username: user.username,
            role: user.role.as_str().to_string(),
            restaurant_id: user.restaurant_id.map(|id| id.to_string()),
        },
    }))
}
