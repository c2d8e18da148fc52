// handlers/usertrips/create.rs - POST /usertrips handler

use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::require;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::TripService;

use super::UserTripResponse;

/// POST /usertrips - Enroll a user as a collaborator on a trip
///
/// Expected Input:
/// ```json
/// {
///   "user": 2,
///   "trip": 1
/// }
/// ```
///
/// The requester must already collaborate on the trip. Enrolling the same
/// user twice is a conflict.
pub async fn usertrip_create(
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateUserTripRequest>,
) -> ApiResult<UserTripResponse> {
    let auth_user = current.require()?;

    let user_id = require("user", payload.user)?;
    let trip_id = require("trip", payload.trip)?;

    let service = TripService::new().await?;
    let membership = service
        .create_membership(auth_user.user_id, user_id, trip_id)
        .await?;

    Ok(ApiResponse::created(UserTripResponse::from(membership)))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserTripRequest {
    pub user: Option<i64>,
    pub trip: Option<i64>,
}
