//! User route handlers: registration, login, listing.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use tradepost_core::SessionToken;

use crate::error::AppError;
use crate::models::User;
use crate::services::IdentityService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body: the opaque bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: SessionToken,
}

/// `POST /users` - register a new user.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = IdentityService::new(state.pool())
        .register(&req.username, &req.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users` - list all users.
///
/// Credential fields are never serialized; see [`User`].
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = IdentityService::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// `POST /users/login` - exchange credentials for a fresh bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = IdentityService::new(state.pool())
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
