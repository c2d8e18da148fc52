use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One calendar date inside a trip's span, derived from the trip's date range
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Day {
    pub id: i64,
    pub trip_id: i64,
    pub date: NaiveDate,
}
