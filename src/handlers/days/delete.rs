// handlers/days/delete.rs - DELETE /days/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

/// DELETE /days/:id - Remove a day (collaborators only); its events go too
pub async fn day_delete(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<()> {
    let auth_user = current.require()?;

    let service = ItineraryService::new().await?;
    service.delete_day(auth_user.user_id, id).await?;

    Ok(ApiResponse::<()>::no_content())
}
