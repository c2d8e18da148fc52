// handlers/users/list.rs - GET /users handler

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccountService;

use super::UserResponse;

/// GET /users - List all users
pub async fn user_list() -> ApiResult<Vec<UserResponse>> {
    let service = AccountService::new().await?;
    let users = service.list_users().await?;

    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}
