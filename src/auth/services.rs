//! User persistence

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::init_data::TelegramIdentity;
use super::models::User;
use crate::common::ApiError;

pub struct UsersService {
    db: SqlitePool,
}

impl UsersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates the user on first sign-in, refreshes the profile fields afterwards
    pub async fn upsert_user(&self, identity: &TelegramIdentity) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, first_name, last_name, username)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(telegram_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                username = excluded.username,
                updated_at = datetime('now')
            RETURNING id, telegram_id, first_name, last_name, username, created_at, updated_at
            "#,
        )
        .bind(identity.telegram_id)
        .bind(&identity.first_name)
        .bind(identity.last_name.as_deref())
        .bind(identity.username.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(
            telegram_id = identity.telegram_id,
            user_id = user.id,
            "User signed in"
        );

        Ok(user)
    }

    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, telegram_id, first_name, last_name, username, created_at, updated_at
            FROM users
            WHERE telegram_id = ?
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Loads the registered user or fails with 404 "User not found"
    pub async fn require_user(&self, telegram_id: i64) -> Result<User, ApiError> {
        match self.find_by_telegram_id(telegram_id).await? {
            Some(user) => Ok(user),
            None => {
                debug!(telegram_id = telegram_id, "No user registered for identity");
                Err(ApiError::NotFound("User not found".to_string()))
            }
        }
    }
}
