// handlers/users/update.rs - PUT /users/:id handler

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::account_service::{AccountService, UserChanges};

use super::UserResponse;

/// PUT /users/:id - Edit account data
///
/// Owner-only: a user may edit nobody's account but their own. All fields
/// are optional; a supplied password is re-hashed before storage.
pub async fn user_update(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let auth_user = current.require()?;

    if auth_user.user_id != id {
        return Err(ApiError::forbidden(
            "You do not have permission to edit this user",
        ));
    }

    let service = AccountService::new().await?;
    let user = service
        .update_user(
            id,
            UserChanges {
                username: payload.username,
                email: payload.email,
                password: payload.password,
                first_name: payload.first_name,
                last_name: payload.last_name,
            },
        )
        .await?;

    Ok(ApiResponse::success(UserResponse::from(user)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
