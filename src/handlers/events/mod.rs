pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::event_create;
pub use delete::event_delete;
pub use list::event_list;
pub use show::event_show;
pub use update::event_update;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::handlers::categories::CategoryResponse;
use crate::services::itinerary_service::EventDetail;

/// Day summary embedded in event representations; the trip stays a reference
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub id: i64,
    pub trip: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub day: DaySummary,
    pub title: String,
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub category: Option<CategoryResponse>,
}

impl From<EventDetail> for EventResponse {
    fn from(event: EventDetail) -> Self {
        let category = match (event.category_id, event.category_name) {
            (Some(id), Some(name)) => Some(CategoryResponse { id, name }),
            _ => None,
        };

        Self {
            id: event.id,
            day: DaySummary {
                id: event.day_id,
                trip: event.trip_id,
                date: event.date,
            },
            title: event.title,
            location: event.location,
            start_time: event.start_time,
            end_time: event.end_time,
            category,
        }
    }
}
