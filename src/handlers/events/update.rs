// handlers/events/update.rs - PUT /events/:id handler

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use crate::api::parse_time;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::itinerary_service::{EventChanges, ItineraryService};

use super::EventResponse;

/// PUT /events/:id - Edit an event (collaborators only); all fields optional
pub async fn event_update(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateEventRequest>,
) -> ApiResult<EventResponse> {
    let auth_user = current.require()?;

    let start_time = payload
        .start_time
        .map(|value| parse_time("start_time", &value))
        .transpose()?;
    let end_time = payload
        .end_time
        .map(|value| parse_time("end_time", &value))
        .transpose()?;

    let changes = EventChanges {
        title: payload.title,
        location: payload.location,
        start_time,
        end_time,
        category_id: payload.category,
    };

    let service = ItineraryService::new().await?;
    let event = service.update_event(auth_user.user_id, id, changes).await?;

    Ok(ApiResponse::success(EventResponse::from(event)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<i64>,
}
