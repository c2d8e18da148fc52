use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: i64,
    pub creator_id: i64,
    pub title: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
