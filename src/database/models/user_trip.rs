use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Collaborator membership joining a user to a trip
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserTrip {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
}
