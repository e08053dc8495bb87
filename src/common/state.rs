// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::config::AppConfig;
use crate::common::dev_mode::DevModeConfig;

/// Application state containing database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub bot_token: Option<String>,
    pub init_data_max_age_secs: i64,
    pub dev_mode: DevModeConfig,
}

/// How handlers receive the state through `Extension`
pub type SharedState = Arc<RwLock<AppState>>;

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        Self {
            db,
            bot_token: config.bot_token.clone(),
            init_data_max_age_secs: config.init_data_max_age_secs,
            dev_mode: config.dev_mode.clone(),
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::common::config::DEFAULT_INIT_DATA_MAX_AGE_SECS;
    use sqlx::sqlite::SqlitePoolOptions;

    pub const TEST_BOT_TOKEN: &str = "123456:TEST-TOKEN";

    /// Fresh in-memory database with the production schema applied.
    /// A single connection keeps every query on the same memory database.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        crate::common::migrations::run_migrations(&pool).await.unwrap();

        pool
    }

    pub async fn test_state() -> SharedState {
        AppState {
            db: test_pool().await,
            bot_token: Some(TEST_BOT_TOKEN.to_string()),
            init_data_max_age_secs: DEFAULT_INIT_DATA_MAX_AGE_SECS,
            dev_mode: DevModeConfig::disabled(),
        }
        .into_shared()
    }
}
