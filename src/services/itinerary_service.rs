use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use thiserror::Error;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Category, Day, Event, Trip};
use crate::error::ApiError;

use super::{is_unique_violation, user_in_trip};

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("Trip not found")]
    TripNotFound,

    #[error("Day not found")]
    DayNotFound,

    #[error("Event not found")]
    EventNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("{0}")]
    Forbidden(String),

    #[error("This trip already has a day for that date")]
    DuplicateDay,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<ItineraryError> for ApiError {
    fn from(err: ItineraryError) -> Self {
        match err {
            ItineraryError::TripNotFound => ApiError::not_found("This trip does not exist"),
            ItineraryError::DayNotFound => ApiError::not_found("Day not found"),
            ItineraryError::EventNotFound => ApiError::not_found("Event not found"),
            ItineraryError::CategoryNotFound => ApiError::not_found("Category not found"),
            ItineraryError::Forbidden(msg) => ApiError::forbidden(msg),
            ItineraryError::DuplicateDay => {
                ApiError::conflict("This trip already has a day for that date")
            }
            other => {
                tracing::error!("Itinerary error: {}", other);
                ApiError::internal_server_error("Itinerary operation failed")
            }
        }
    }
}

fn forbidden(action: &str) -> ItineraryError {
    ItineraryError::Forbidden(format!("Only a collaborator of the trip can {}", action))
}

/// Day row joined with its owning trip for the wire representation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DayWithTrip {
    pub id: i64,
    pub date: NaiveDate,
    pub trip_id: i64,
    pub creator_id: i64,
    pub title: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

const DAY_WITH_TRIP_SQL: &str = r#"
SELECT d.id, d.date,
       t.id AS trip_id, t.creator_id, t.title, t.city, t.start_date, t.end_date
FROM days d
JOIN trips t ON t.id = d.trip_id
"#;

/// Event row joined with its day and category for the wire representation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventDetail {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub day_id: i64,
    pub trip_id: i64,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

const EVENT_DETAIL_SQL: &str = r#"
SELECT e.id, e.title, e.location, e.start_time, e.end_time,
       d.id AS day_id, d.trip_id, d.date,
       c.id AS category_id, c.name AS category_name
FROM events e
JOIN days d ON d.id = e.day_id
LEFT JOIN categories c ON c.id = e.category_id
"#;

/// A fully validated event-creation payload
#[derive(Debug)]
pub struct NewEvent {
    pub day_id: i64,
    pub title: String,
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub category_id: Option<i64>,
}

/// Partial event update; absent fields keep their current value
#[derive(Debug, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub category_id: Option<i64>,
}

pub struct ItineraryService {
    pool: PgPool,
}

impl ItineraryService {
    pub async fn new() -> Result<Self, ItineraryError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    // --- days ---

    pub async fn create_day(
        &self,
        user_id: i64,
        trip_id: i64,
        date: NaiveDate,
    ) -> Result<DayWithTrip, ItineraryError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(trip_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::TripNotFound)?;

        if !user_in_trip(&self.pool, user_id, trip_id).await? {
            return Err(forbidden("add days"));
        }

        let result =
            sqlx::query_as::<_, Day>("INSERT INTO days (trip_id, date) VALUES ($1, $2) RETURNING *")
                .bind(trip_id)
                .bind(date)
                .fetch_one(&self.pool)
                .await;

        let day = match result {
            Ok(day) => day,
            Err(err) if is_unique_violation(&err) => return Err(ItineraryError::DuplicateDay),
            Err(err) => return Err(err.into()),
        };

        Ok(DayWithTrip {
            id: day.id,
            date: day.date,
            trip_id: trip.id,
            creator_id: trip.creator_id,
            title: trip.title,
            city: trip.city,
            start_date: trip.start_date,
            end_date: trip.end_date,
        })
    }

    pub async fn get_day(
        &self,
        user_id: Option<i64>,
        day_id: i64,
    ) -> Result<DayWithTrip, ItineraryError> {
        let day = self.get_day_detail(day_id).await?;
        self.require_membership(user_id, day.trip_id, "view this day").await?;
        Ok(day)
    }

    /// Days of the trips the given user collaborates on; anonymous callers see nothing
    pub async fn list_days(&self, user_id: Option<i64>) -> Result<Vec<DayWithTrip>, ItineraryError> {
        let Some(user_id) = user_id else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "{} WHERE d.trip_id IN (SELECT trip_id FROM user_trips WHERE user_id = $1) ORDER BY d.date, d.id",
            DAY_WITH_TRIP_SQL
        );
        let days = sqlx::query_as::<_, DayWithTrip>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(days)
    }

    /// Delete a day; its events cascade at the storage layer
    pub async fn delete_day(&self, user_id: i64, day_id: i64) -> Result<(), ItineraryError> {
        let day = sqlx::query_as::<_, Day>("SELECT * FROM days WHERE id = $1")
            .bind(day_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::DayNotFound)?;

        if !user_in_trip(&self.pool, user_id, day.trip_id).await? {
            return Err(forbidden("delete days"));
        }

        sqlx::query("DELETE FROM days WHERE id = $1")
            .bind(day_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // --- events ---

    pub async fn create_event(
        &self,
        user_id: i64,
        new_event: NewEvent,
    ) -> Result<EventDetail, ItineraryError> {
        let day = sqlx::query_as::<_, Day>("SELECT * FROM days WHERE id = $1")
            .bind(new_event.day_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::DayNotFound)?;

        if !user_in_trip(&self.pool, user_id, day.trip_id).await? {
            return Err(forbidden("add events"));
        }

        if let Some(category_id) = new_event.category_id {
            self.require_category(category_id).await?;
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (day_id, title, location, start_time, end_time, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new_event.day_id)
        .bind(&new_event.title)
        .bind(&new_event.location)
        .bind(new_event.start_time)
        .bind(new_event.end_time)
        .bind(new_event.category_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_event_detail(event.id).await
    }

    pub async fn get_event(
        &self,
        user_id: Option<i64>,
        event_id: i64,
    ) -> Result<EventDetail, ItineraryError> {
        let event = self.get_event_detail(event_id).await?;
        self.require_membership(user_id, event.trip_id, "view this event").await?;
        Ok(event)
    }

    /// Events across the trips the given user collaborates on
    pub async fn list_events(
        &self,
        user_id: Option<i64>,
    ) -> Result<Vec<EventDetail>, ItineraryError> {
        let Some(user_id) = user_id else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "{} WHERE d.trip_id IN (SELECT trip_id FROM user_trips WHERE user_id = $1) ORDER BY d.date, e.start_time, e.id",
            EVENT_DETAIL_SQL
        );
        let events = sqlx::query_as::<_, EventDetail>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    pub async fn update_event(
        &self,
        user_id: i64,
        event_id: i64,
        changes: EventChanges,
    ) -> Result<EventDetail, ItineraryError> {
        let current = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::EventNotFound)?;

        let day = sqlx::query_as::<_, Day>("SELECT * FROM days WHERE id = $1")
            .bind(current.day_id)
            .fetch_one(&self.pool)
            .await?;

        if !user_in_trip(&self.pool, user_id, day.trip_id).await? {
            return Err(forbidden("edit events"));
        }

        if let Some(category_id) = changes.category_id {
            self.require_category(category_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE events
            SET title = $1, location = $2, start_time = $3, end_time = $4, category_id = $5
            WHERE id = $6
            "#,
        )
        .bind(changes.title.unwrap_or(current.title))
        .bind(changes.location.or(current.location))
        .bind(changes.start_time.unwrap_or(current.start_time))
        .bind(changes.end_time.unwrap_or(current.end_time))
        .bind(changes.category_id.or(current.category_id))
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        self.get_event_detail(event_id).await
    }

    pub async fn delete_event(&self, user_id: i64, event_id: i64) -> Result<(), ItineraryError> {
        let event = self.get_event_detail(event_id).await?;

        if !user_in_trip(&self.pool, user_id, event.trip_id).await? {
            return Err(forbidden("delete events"));
        }

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // --- categories ---

    pub async fn create_category(&self, name: String) -> Result<Category, ItineraryError> {
        let category =
            sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES ($1) RETURNING *")
                .bind(&name)
                .fetch_one(&self.pool)
                .await?;
        Ok(category)
    }

    pub async fn get_category(&self, category_id: i64) -> Result<Category, ItineraryError> {
        self.require_category(category_id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ItineraryError> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn update_category(
        &self,
        category_id: i64,
        name: String,
    ) -> Result<Category, ItineraryError> {
        self.require_category(category_id).await?;

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(&name)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Delete a category; events referencing it fall back to no category
    pub async fn delete_category(&self, category_id: i64) -> Result<(), ItineraryError> {
        self.require_category(category_id).await?;

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // --- helpers ---

    async fn get_day_detail(&self, day_id: i64) -> Result<DayWithTrip, ItineraryError> {
        let sql = format!("{} WHERE d.id = $1", DAY_WITH_TRIP_SQL);
        sqlx::query_as::<_, DayWithTrip>(&sql)
            .bind(day_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::DayNotFound)
    }

    async fn get_event_detail(&self, event_id: i64) -> Result<EventDetail, ItineraryError> {
        let sql = format!("{} WHERE e.id = $1", EVENT_DETAIL_SQL);
        sqlx::query_as::<_, EventDetail>(&sql)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::EventNotFound)
    }

    async fn require_category(&self, category_id: i64) -> Result<Category, ItineraryError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ItineraryError::CategoryNotFound)
    }

    async fn require_membership(
        &self,
        user_id: Option<i64>,
        trip_id: i64,
        action: &str,
    ) -> Result<(), ItineraryError> {
        let is_member = match user_id {
            Some(user_id) => user_in_trip(&self.pool, user_id, trip_id).await?,
            None => false,
        };

        if is_member {
            Ok(())
        } else {
            Err(forbidden(action))
        }
    }
}
