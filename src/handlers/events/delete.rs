// handlers/events/delete.rs - DELETE /events/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

/// DELETE /events/:id - Remove an event (collaborators only)
pub async fn event_delete(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<()> {
    let auth_user = current.require()?;

    let service = ItineraryService::new().await?;
    service.delete_event(auth_user.user_id, id).await?;

    Ok(ApiResponse::<()>::no_content())
}
