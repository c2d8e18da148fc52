pub mod login;
pub mod register;

pub use login::login;
pub use register::register;

use serde::Serialize;

use crate::handlers::users::UserResponse;

/// Token grant returned by both /register and /login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_in: u64,
}

pub(super) fn expires_in_secs() -> u64 {
    crate::config::config().security.jwt_expiry_hours * 3600
}
