pub mod create;
pub mod delete;
pub mod list;

pub use create::usertrip_create;
pub use delete::usertrip_delete;
pub use list::usertrip_list;

use serde::Serialize;

use crate::database::models::Trip;
use crate::handlers::trips::TripResponse;
use crate::handlers::users::UserResponse;
use crate::services::trip_service::UserTripDetail;

/// Membership representation with user and trip embedded
#[derive(Debug, Serialize)]
pub struct UserTripResponse {
    pub id: i64,
    pub user: UserResponse,
    pub trip: TripResponse,
}

impl From<UserTripDetail> for UserTripResponse {
    fn from(detail: UserTripDetail) -> Self {
        Self {
            id: detail.id,
            user: UserResponse {
                id: detail.user_id,
                username: detail.username,
                first_name: detail.first_name,
                last_name: detail.last_name,
                email: detail.email,
            },
            trip: TripResponse::from(Trip {
                id: detail.trip_id,
                creator_id: detail.creator_id,
                title: detail.title,
                city: detail.city,
                start_date: detail.start_date,
                end_date: detail.end_date,
            }),
        }
    }
}
