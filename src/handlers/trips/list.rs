// handlers/trips/list.rs - GET /trips handler

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::TripService;

use super::TripResponse;

/// GET /trips - List the requester's trips
///
/// Scoped to trips the requester collaborates on; anonymous requests get an
/// empty list rather than an error.
pub async fn trip_list(Extension(current): Extension<CurrentUser>) -> ApiResult<Vec<TripResponse>> {
    let service = TripService::new().await?;
    let trips = service
        .list_for(current.0.as_ref().map(|user| user.user_id))
        .await?;

    Ok(ApiResponse::success(
        trips.into_iter().map(TripResponse::from).collect(),
    ))
}
