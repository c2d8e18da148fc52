pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::trip_create;
pub use delete::trip_delete;
pub use list::trip_list;
pub use show::trip_show;
pub use update::trip_update;

use chrono::NaiveDate;
use serde::Serialize;

use crate::database::models::Trip;

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: i64,
    pub creator: i64,
    pub title: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            creator: trip.creator_id,
            title: trip.title,
            city: trip.city,
            start_date: trip.start_date,
            end_date: trip.end_date,
        }
    }
}
