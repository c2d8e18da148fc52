// handlers/trips/delete.rs - DELETE /trips/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::TripService;

/// DELETE /trips/:id - Destroy a trip (creator only)
///
/// Days, their events and collaborator memberships cascade with the trip.
pub async fn trip_delete(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<()> {
    let auth_user = current.require()?;

    let service = TripService::new().await?;
    service.delete(id, auth_user.user_id).await?;

    Ok(ApiResponse::<()>::no_content())
}
