// handlers/events/list.rs - GET /events handler

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::EventResponse;

/// GET /events - List events across the requester's trips
pub async fn event_list(
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Vec<EventResponse>> {
    let service = ItineraryService::new().await?;
    let events = service
        .list_events(current.0.as_ref().map(|user| user.user_id))
        .await?;

    Ok(ApiResponse::success(
        events.into_iter().map(EventResponse::from).collect(),
    ))
}
