pub mod auth;
pub mod response;

pub use auth::{bearer_auth_middleware, AuthUser, CurrentUser};
pub use response::{ApiResponse, ApiResult};
