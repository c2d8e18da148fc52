// handlers/days/list.rs - GET /days handler

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::ItineraryService;

use super::DayResponse;

/// GET /days - List days across the requester's trips
pub async fn day_list(Extension(current): Extension<CurrentUser>) -> ApiResult<Vec<DayResponse>> {
    let service = ItineraryService::new().await?;
    let days = service
        .list_days(current.0.as_ref().map(|user| user.user_id))
        .await?;

    Ok(ApiResponse::success(
        days.into_iter().map(DayResponse::from).collect(),
    ))
}
