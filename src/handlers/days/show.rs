// handlers/days/show.rs - GET /days/:id handler

use axum::{extract::Path, Extension};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::DayResponse;

/// GET /days/:id - Retrieve a day on one of the requester's trips
pub async fn day_show(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<DayResponse> {
    let service = ItineraryService::new().await?;
    let day = service
        .get_day(current.0.as_ref().map(|user| user.user_id), id)
        .await?;

    Ok(ApiResponse::success(DayResponse::from(day)))
}
