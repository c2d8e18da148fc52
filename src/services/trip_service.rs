use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Trip, UserTrip};
use crate::error::ApiError;

use super::{is_unique_violation, user_in_trip};

#[derive(Debug, Error)]
pub enum TripError {
    #[error("Trip not found")]
    NotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Membership not found")]
    MembershipNotFound,

    #[error("Only the trip creator can modify this trip")]
    NotOwner,

    #[error("Only a collaborator of the trip can manage memberships")]
    NotCollaborator,

    #[error("start_date must be on or before end_date")]
    InvalidDateRange,

    #[error("User is already a collaborator on this trip")]
    DuplicateMembership,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::NotFound => ApiError::not_found("This trip does not exist"),
            TripError::UserNotFound => ApiError::not_found("User not found"),
            TripError::MembershipNotFound => ApiError::not_found("Membership not found"),
            TripError::NotOwner => ApiError::forbidden("Only the trip creator can modify this trip"),
            TripError::NotCollaborator => {
                ApiError::forbidden("Only a collaborator of the trip can manage memberships")
            }
            TripError::InvalidDateRange => {
                ApiError::validation_error("start_date must be on or before end_date", None)
            }
            TripError::DuplicateMembership => {
                ApiError::conflict("User is already a collaborator on this trip")
            }
            other => {
                tracing::error!("Trip error: {}", other);
                ApiError::internal_server_error("Trip operation failed")
            }
        }
    }
}

/// A fully validated trip-creation payload
#[derive(Debug)]
pub struct NewTrip {
    pub title: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Partial trip update; absent fields keep their current value
#[derive(Debug, Default)]
pub struct TripChanges {
    pub title: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Membership row joined with its user and trip for the wire representation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserTripDetail {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub trip_id: i64,
    pub creator_id: i64,
    pub title: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

const USER_TRIP_DETAIL_SQL: &str = r#"
SELECT ut.id,
       u.id AS user_id, u.username, u.email, u.first_name, u.last_name,
       t.id AS trip_id, t.creator_id, t.title, t.city, t.start_date, t.end_date
FROM user_trips ut
JOIN users u ON u.id = ut.user_id
JOIN trips t ON t.id = ut.trip_id
"#;

pub struct TripService {
    pool: PgPool,
}

impl TripService {
    pub async fn new() -> Result<Self, TripError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Create a trip, enroll the creator as a collaborator and generate one
    /// day per date in the inclusive [start_date, end_date] range.
    ///
    /// Runs in a single transaction: either the trip arrives with its full
    /// day set, or nothing is persisted.
    pub async fn create(&self, creator_id: i64, new_trip: NewTrip) -> Result<Trip, TripError> {
        if new_trip.start_date > new_trip.end_date {
            return Err(TripError::InvalidDateRange);
        }

        let mut tx = self.pool.begin().await?;

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (creator_id, title, city, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(creator_id)
        .bind(&new_trip.title)
        .bind(&new_trip.city)
        .bind(new_trip.start_date)
        .bind(new_trip.end_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_trips (user_id, trip_id) VALUES ($1, $2)")
            .bind(creator_id)
            .bind(trip.id)
            .execute(&mut *tx)
            .await?;

        for date in expected_dates(trip.start_date, trip.end_date) {
            sqlx::query("INSERT INTO days (trip_id, date) VALUES ($1, $2)")
                .bind(trip.id)
                .bind(date)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(trip)
    }

    pub async fn get(&self, trip_id: i64) -> Result<Trip, TripError> {
        sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(trip_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(TripError::NotFound)
    }

    /// Trips the given user collaborates on; anonymous callers see nothing
    pub async fn list_for(&self, user_id: Option<i64>) -> Result<Vec<Trip>, TripError> {
        let Some(user_id) = user_id else {
            return Ok(Vec::new());
        };

        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT t.* FROM trips t
            JOIN user_trips ut ON ut.trip_id = t.id
            WHERE ut.user_id = $1
            ORDER BY t.start_date, t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    /// Update trip fields and, when the date range moved, resynchronize the
    /// day set so it exactly covers the new inclusive range.
    ///
    /// Days whose date stays in range are left untouched, which is what keeps
    /// their events alive across a resize. The whole sequence shares one
    /// transaction, so a failure midway leaves the old state intact.
    pub async fn update(
        &self,
        trip_id: i64,
        user_id: i64,
        changes: TripChanges,
    ) -> Result<Trip, TripError> {
        let current = self.get(trip_id).await?;
        if current.creator_id != user_id {
            return Err(TripError::NotOwner);
        }

        let dates_changed = changes.start_date.is_some() || changes.end_date.is_some();
        let start_date = changes.start_date.unwrap_or(current.start_date);
        let end_date = changes.end_date.unwrap_or(current.end_date);

        // Reject before any mutation; the date walk below is meaningless otherwise
        if start_date > end_date {
            return Err(TripError::InvalidDateRange);
        }

        let mut tx = self.pool.begin().await?;

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET title = $1, city = $2, start_date = $3, end_date = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(changes.title.unwrap_or(current.title))
        .bind(changes.city.unwrap_or(current.city))
        .bind(start_date)
        .bind(end_date)
        .bind(trip_id)
        .fetch_one(&mut *tx)
        .await?;

        if dates_changed {
            sync_days(&mut tx, trip_id, start_date, end_date).await?;
        }

        tx.commit().await?;
        Ok(trip)
    }

    /// Delete a trip; days, their events and memberships cascade with it
    pub async fn delete(&self, trip_id: i64, user_id: i64) -> Result<(), TripError> {
        let trip = self.get(trip_id).await?;
        if trip.creator_id != user_id {
            return Err(TripError::NotOwner);
        }

        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn is_collaborator(&self, user_id: i64, trip_id: i64) -> Result<bool, TripError> {
        Ok(user_in_trip(&self.pool, user_id, trip_id).await?)
    }

    /// Enroll a user as a collaborator. The requester must already
    /// collaborate on the trip; the creator is enrolled at creation time,
    /// so invitations always flow from an existing member.
    pub async fn create_membership(
        &self,
        requester_id: i64,
        user_id: i64,
        trip_id: i64,
    ) -> Result<UserTripDetail, TripError> {
        self.get(trip_id).await?;

        let user_exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        if user_exists.0 == 0 {
            return Err(TripError::UserNotFound);
        }

        if !user_in_trip(&self.pool, requester_id, trip_id).await? {
            return Err(TripError::NotCollaborator);
        }

        let result = sqlx::query_as::<_, UserTrip>(
            "INSERT INTO user_trips (user_id, trip_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(trip_id)
        .fetch_one(&self.pool)
        .await;

        let membership = match result {
            Ok(membership) => membership,
            Err(err) if is_unique_violation(&err) => return Err(TripError::DuplicateMembership),
            Err(err) => return Err(err.into()),
        };

        self.get_membership_detail(membership.id).await
    }

    /// Memberships of the given user, with user and trip embedded
    pub async fn list_memberships(
        &self,
        user_id: Option<i64>,
    ) -> Result<Vec<UserTripDetail>, TripError> {
        let Some(user_id) = user_id else {
            return Ok(Vec::new());
        };

        let sql = format!("{} WHERE ut.user_id = $1 ORDER BY ut.id", USER_TRIP_DETAIL_SQL);
        let memberships = sqlx::query_as::<_, UserTripDetail>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(memberships)
    }

    pub async fn delete_membership(
        &self,
        requester_id: i64,
        membership_id: i64,
    ) -> Result<(), TripError> {
        let membership =
            sqlx::query_as::<_, UserTrip>("SELECT * FROM user_trips WHERE id = $1")
                .bind(membership_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(TripError::MembershipNotFound)?;

        // Members may always remove themselves; removing someone else takes
        // membership on the same trip
        if membership.user_id != requester_id
            && !user_in_trip(&self.pool, requester_id, membership.trip_id).await?
        {
            return Err(TripError::NotCollaborator);
        }

        sqlx::query("DELETE FROM user_trips WHERE id = $1")
            .bind(membership_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_membership_detail(&self, membership_id: i64) -> Result<UserTripDetail, TripError> {
        let sql = format!("{} WHERE ut.id = $1", USER_TRIP_DETAIL_SQL);
        sqlx::query_as::<_, UserTripDetail>(&sql)
            .bind(membership_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(TripError::MembershipNotFound)
    }
}

/// Reconcile the day set of a trip with a new inclusive date range.
///
/// Out-of-range days go first (their events cascade at the storage layer),
/// then days are created for every expected date not already present. Days
/// already inside the range keep their identity.
async fn sync_days(
    tx: &mut Transaction<'_, Postgres>,
    trip_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM days WHERE trip_id = $1 AND date < $2")
        .bind(trip_id)
        .bind(start_date)
        .execute(&mut **tx)
        .await?;

    sqlx::query("DELETE FROM days WHERE trip_id = $1 AND date > $2")
        .bind(trip_id)
        .bind(end_date)
        .execute(&mut **tx)
        .await?;

    let existing: Vec<(NaiveDate,)> = sqlx::query_as("SELECT date FROM days WHERE trip_id = $1")
        .bind(trip_id)
        .fetch_all(&mut **tx)
        .await?;
    let existing: HashSet<NaiveDate> = existing.into_iter().map(|row| row.0).collect();

    for date in missing_dates(start_date, end_date, &existing) {
        sqlx::query("INSERT INTO days (trip_id, date) VALUES ($1, $2)")
            .bind(trip_id)
            .bind(date)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

/// Number of calendar days in the inclusive range; callers guarantee start <= end
fn trip_length(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
    (end_date - start_date).num_days() + 1
}

/// Every date a trip with this range must have a day for
fn expected_dates(start_date: NaiveDate, end_date: NaiveDate) -> Vec<NaiveDate> {
    (0..trip_length(start_date, end_date))
        .map(|offset| start_date + Duration::days(offset))
        .collect()
}

/// Expected dates not present in the existing set, in range order
fn missing_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    existing: &HashSet<NaiveDate>,
) -> Vec<NaiveDate> {
    expected_dates(start_date, end_date)
        .into_iter()
        .filter(|date| !existing.contains(date))
        .collect()
}
