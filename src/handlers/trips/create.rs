// handlers/trips/create.rs - POST /trips handler

use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::{parse_date, require};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::trip_service::{NewTrip, TripService};

use super::TripResponse;

/// POST /trips - Create a trip
///
/// Expected Input:
/// ```json
/// {
///   "title": "My Trip",
///   "city": "New York",
///   "start_date": "2024-05-01",
///   "end_date": "2024-05-10"
/// }
/// ```
///
/// The creator is enrolled as a collaborator and one day is generated per
/// date in the inclusive range. `start_date` after `end_date` is rejected
/// before anything is written.
pub async fn trip_create(
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateTripRequest>,
) -> ApiResult<TripResponse> {
    let auth_user = current.require()?;

    let start_date = parse_date("start_date", &require("start_date", payload.start_date)?)?;
    let end_date = parse_date("end_date", &require("end_date", payload.end_date)?)?;

    let new_trip = NewTrip {
        title: require("title", payload.title)?,
        city: require("city", payload.city)?,
        start_date,
        end_date,
    };

    let service = TripService::new().await?;
    let trip = service.create(auth_user.user_id, new_trip).await?;

    Ok(ApiResponse::created(TripResponse::from(trip)))
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub title: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
