// handlers/events/create.rs - POST /events handler

use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::{parse_time, require};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::itinerary_service::{ItineraryService, NewEvent};

use super::EventResponse;

/// POST /events - Schedule an event on a day
///
/// Expected Input:
/// ```json
/// {
///   "day": 12,
///   "title": "Walking tour",
///   "location": "Old town",        // Optional
///   "start_time": "10:00",
///   "end_time": "12:30",
///   "category": 3                  // Optional
/// }
/// ```
///
/// Only a collaborator of the day's trip can add events.
pub async fn event_create(
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateEventRequest>,
) -> ApiResult<EventResponse> {
    let auth_user = current.require()?;

    let new_event = NewEvent {
        day_id: require("day", payload.day)?,
        title: require("title", payload.title)?,
        location: payload.location,
        start_time: parse_time("start_time", &require("start_time", payload.start_time)?)?,
        end_time: parse_time("end_time", &require("end_time", payload.end_time)?)?,
        category_id: payload.category,
    };

    let service = ItineraryService::new().await?;
    let event = service.create_event(auth_user.user_id, new_event).await?;

    Ok(ApiResponse::created(EventResponse::from(event)))
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub day: Option<i64>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<i64>,
}
