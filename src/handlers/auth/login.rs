// handlers/auth/login.rs - POST /login handler

use axum::Json;
use serde::Deserialize;

use crate::api::require;
use crate::auth::{generate_jwt, Claims};
use crate::handlers::users::UserResponse;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccountService;

use super::{expires_in_secs, TokenResponse};

/// POST /login - Authenticate and receive a bearer token
///
/// Expected Input:
/// ```json
/// {
///   "username": "string",    // Required
///   "password": "string"     // Required
/// }
/// ```
///
/// Bad credentials are a 401; the token never leaks whether the username
/// or the password was wrong.
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<TokenResponse> {
    let username = require("username", payload.username)?;
    let password = require("password", payload.password)?;

    let service = AccountService::new().await?;
    let user = service.authenticate(&username, &password).await?;

    let token = generate_jwt(Claims::new(user.id, user.username.clone()))?;

    Ok(ApiResponse::success(TokenResponse {
        token,
        user: UserResponse::from(user),
        expires_in: expires_in_secs(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}
