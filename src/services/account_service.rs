use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::PgPool;
use thiserror::Error;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::User;
use crate::error::ApiError;

use super::is_unique_violation;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    NotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Password hashing failed")]
    Hashing,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound => ApiError::not_found("User not found"),
            AccountError::InvalidCredentials => {
                ApiError::unauthorized("Invalid username or password")
            }
            AccountError::UsernameTaken(name) => {
                ApiError::conflict(format!("Username '{}' is already taken", name))
            }
            other => {
                tracing::error!("Account error: {}", other);
                ApiError::internal_server_error("Account operation failed")
            }
        }
    }
}

/// A fully validated registration payload
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial user update; absent fields keep their current value
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub async fn new() -> Result<Self, AccountError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Create a user account with an argon2 password hash
    pub async fn register(&self, new_user: NewUser) -> Result<User, AccountError> {
        let password_hash = hash_password(&new_user.password)?;

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(err) if is_unique_violation(&err) => {
                Err(AccountError::UsernameTaken(new_user.username))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Verify credentials and return the matching user
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AccountError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AccountError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AccountError::NotFound)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Apply a partial update; a new password is re-hashed before storage
    pub async fn update_user(&self, id: i64, changes: UserChanges) -> Result<User, AccountError> {
        let current = self.get_user(id).await?;

        let password_hash = match changes.password {
            Some(password) => hash_password(&password)?,
            None => current.password_hash,
        };

        let username = changes.username.unwrap_or(current.username);

        let result = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, email = $2, first_name = $3, last_name = $4, password_hash = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&username)
        .bind(changes.email.unwrap_or(current.email))
        .bind(changes.first_name.unwrap_or(current.first_name))
        .bind(changes.last_name.unwrap_or(current.last_name))
        .bind(&password_hash)
        .bind(id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(err) if is_unique_violation(&err) => Err(AccountError::UsernameTaken(username)),
            Err(err) => Err(err.into()),
        }
    }
}

fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::Hashing)
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
