// handlers/users/show.rs - GET /users/:id handler

use axum::extract::Path;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccountService;

use super::UserResponse;

/// GET /users/:id - Retrieve a single user
pub async fn user_show(Path(id): Path<i64>) -> ApiResult<UserResponse> {
    let service = AccountService::new().await?;
    let user = service.get_user(id).await?;

    Ok(ApiResponse::success(UserResponse::from(user)))
}
