// handlers/trips/update.rs - PUT /trips/:id handler

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use crate::api::parse_date;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::trip_service::{TripChanges, TripService};

use super::TripResponse;

/// PUT /trips/:id - Edit trip data (creator only)
///
/// All fields are optional. Supplying a new start_date or end_date
/// resynchronizes the trip's day set with the new range: out-of-range days
/// are deleted (their events with them) and newly covered dates gain a day,
/// while days still in range keep their events.
pub async fn trip_update(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateTripRequest>,
) -> ApiResult<TripResponse> {
    let auth_user = current.require()?;

    let start_date = payload
        .start_date
        .map(|value| parse_date("start_date", &value))
        .transpose()?;
    let end_date = payload
        .end_date
        .map(|value| parse_date("end_date", &value))
        .transpose()?;

    let changes = TripChanges {
        title: payload.title,
        city: payload.city,
        start_date,
        end_date,
    };

    let service = TripService::new().await?;
    let trip = service.update(id, auth_user.user_id, changes).await?;

    Ok(ApiResponse::success(TripResponse::from(trip)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
