pub mod list;
pub mod show;
pub mod update;

pub use list::user_list;
pub use show::user_show;
pub use update::user_update;

use serde::Serialize;

use crate::database::models::User;

/// Public user representation; the password hash never crosses the wire
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}
