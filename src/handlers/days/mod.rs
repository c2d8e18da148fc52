pub mod create;
pub mod delete;
pub mod list;
pub mod show;

pub use create::day_create;
pub use delete::day_delete;
pub use list::day_list;
pub use show::day_show;

use chrono::NaiveDate;
use serde::Serialize;

use crate::database::models::Trip;
use crate::handlers::trips::TripResponse;
use crate::services::itinerary_service::DayWithTrip;

/// Day representation with its owning trip embedded one level deep
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub id: i64,
    pub trip: TripResponse,
    pub date: NaiveDate,
}

impl From<DayWithTrip> for DayResponse {
    fn from(day: DayWithTrip) -> Self {
        Self {
            id: day.id,
            date: day.date,
            trip: TripResponse::from(Trip {
                id: day.trip_id,
                creator_id: day.creator_id,
                title: day.title,
                city: day.city,
                start_date: day.start_date,
                end_date: day.end_date,
            }),
        }
    }
}
