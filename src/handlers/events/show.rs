// handlers/events/show.rs - GET /events/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::EventResponse;

/// GET /events/:id - Retrieve an event on one of the requester's trips
pub async fn event_show(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<EventResponse> {
    let service = ItineraryService::new().await?;
    let event = service
        .get_event(current.0.as_ref().map(|user| user.user_id), id)
        .await?;

    Ok(ApiResponse::success(EventResponse::from(event)))
}
