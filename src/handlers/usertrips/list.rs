// handlers/usertrips/list.rs - GET /usertrips handler

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::TripService;

use super::UserTripResponse;

/// GET /usertrips - List the requester's memberships
pub async fn usertrip_list(
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Vec<UserTripResponse>> {
    let service = TripService::new().await?;
    let memberships = service
        .list_memberships(current.0.as_ref().map(|user| user.user_id))
        .await?;

    Ok(ApiResponse::success(
        memberships.into_iter().map(UserTripResponse::from).collect(),
    ))
}
