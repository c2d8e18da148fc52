pub mod account_service;
pub mod itinerary_service;
pub mod trip_service;

pub use account_service::AccountService;
pub use itinerary_service::ItineraryService;
pub use trip_service::TripService;

use sqlx::PgPool;

/// Does a membership row join this user to this trip?
pub(crate) async fn user_in_trip(
    pool: &PgPool,
    user_id: i64,
    trip_id: i64,
) -> Result<bool, sqlx::Error> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM user_trips WHERE user_id = $1 AND trip_id = $2")
            .bind(user_id)
            .bind(trip_id)
            .fetch_one(pool)
            .await?;

    Ok(count.0 > 0)
}

/// Postgres unique-constraint violation (error code 23505)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
