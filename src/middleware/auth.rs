use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated user context extracted from a bearer JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

/// Request-scoped authentication state.
///
/// Every request carries one of these; reads may proceed anonymously while
/// write handlers call [`CurrentUser::require`].
#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<AuthUser>);

impl CurrentUser {
    pub fn require(&self) -> Result<&AuthUser, ApiError> {
        self.0
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Bearer-token middleware.
///
/// A missing Authorization header is not an error - the request continues
/// anonymously and each handler decides what anonymity means. A header that
/// is present but malformed or carries an invalid token is rejected here.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let current = match extract_bearer_token(&headers)? {
        Some(token) => {
            let claims = validate_jwt(&token).map_err(ApiError::unauthorized)?;
            let user = AuthUser::from(claims);
            tracing::debug!("authenticated request for user '{}'", user.username);
            CurrentUser(Some(user))
        }
        None => CurrentUser(None),
    };

    request.extensions_mut().insert(current);
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header, if any
fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let auth_header = match headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
    {
        Some(value) => value,
        None => return Ok(None),
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err(ApiError::unauthorized("Empty bearer token"));
        }
        Ok(Some(token.to_string()))
    } else {
        Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        ))
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid JWT token: {}", e))?;

    Ok(token_data.claims)
}
