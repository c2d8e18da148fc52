// handlers/days/create.rs - POST /days handler

use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::{parse_date, require};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::DayResponse;

/// POST /days - Add a day to a trip
///
/// Expected Input:
/// ```json
/// {
///   "trip": 1,
///   "date": "2024-05-04"
/// }
/// ```
///
/// Collaborators only. A date the trip already covers is a conflict; the
/// day set never holds the same date twice.
pub async fn day_create(
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateDayRequest>,
) -> ApiResult<DayResponse> {
    let auth_user = current.require()?;

    let trip_id = require("trip", payload.trip)?;
    let date = parse_date("date", &require("date", payload.date)?)?;

    let service = ItineraryService::new().await?;
    let day = service.create_day(auth_user.user_id, trip_id, date).await?;

    Ok(ApiResponse::created(DayResponse::from(day)))
}

#[derive(Debug, Deserialize)]
pub struct CreateDayRequest {
    pub trip: Option<i64>,
    pub date: Option<String>,
}
