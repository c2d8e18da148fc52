// handlers/trips/show.rs - GET /trips/:id handler

use axum::{extract::Path, Extension};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::TripService;

use super::TripResponse;

/// GET /trips/:id - Retrieve a trip the requester collaborates on
pub async fn trip_show(
    Path(id): Path<i64>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<TripResponse> {
    let service = TripService::new().await?;
    let trip = service.get(id).await?;

    let is_member = match current.0.as_ref() {
        Some(user) => service.is_collaborator(user.user_id, trip.id).await?,
        None => false,
    };
    if !is_member {
        return Err(ApiError::forbidden(
            "Only a collaborator of the trip can view it",
        ));
    }

    Ok(ApiResponse::success(TripResponse::from(trip)))
}
