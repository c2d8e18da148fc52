// handlers/usertrips/delete.rs - DELETE /usertrips/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::TripService;

/// DELETE /usertrips/:id - Remove a collaborator membership
///
/// The requester must collaborate on the membership's trip.
pub async fn usertrip_delete(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<()> {
    let auth_user = current.require()?;

    let service = TripService::new().await?;
    service.delete_membership(auth_user.user_id, id).await?;

    Ok(ApiResponse::<()>::no_content())
}
