// handlers/auth/register.rs - POST /register handler

use axum::Json;
use serde::Deserialize;

use crate::api::require;
use crate::auth::{generate_jwt, Claims};
use crate::handlers::users::UserResponse;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::account_service::{AccountService, NewUser};

use super::{expires_in_secs, TokenResponse};

/// POST /register - Create a user account and receive a bearer token
///
/// Expected Input:
/// ```json
/// {
///   "username": "string",     // Required
///   "email": "string",        // Required
///   "password": "string",     // Required
///   "first_name": "string",   // Required
///   "last_name": "string"     // Required
/// }
/// ```
///
/// Returns 201 with `{ "token": "...", "user": {...}, "expires_in": 3600 }`.
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<TokenResponse> {
    let new_user = NewUser {
        username: require("username", payload.username)?,
        email: require("email", payload.email)?,
        password: require("password", payload.password)?,
        first_name: require("first_name", payload.first_name)?,
        last_name: require("last_name", payload.last_name)?,
    };

    let service = AccountService::new().await?;
    let user = service.register(new_user).await?;

    let token = generate_jwt(Claims::new(user.id, user.username.clone()))?;

    Ok(ApiResponse::created(TokenResponse {
        token,
        user: UserResponse::from(user),
        expires_in: expires_in_secs(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
