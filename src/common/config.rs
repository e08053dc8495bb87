// src/common/config.rs
//! Runtime configuration loaded from the environment

use std::env;
use std::path::PathBuf;

use super::dev_mode::{apply_cli_override, DevModeConfig};

/// Default freshness window for Telegram `auth_date`, in seconds.
pub const DEFAULT_INIT_DATA_MAX_AGE_SECS: i64 = 3600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bot_token: Option<String>,
    pub init_data_max_age_secs: i64,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub dev_mode: DevModeConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://tracker.db".to_string());

        let bot_token = env::var("BOT_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let init_data_max_age_secs = env::var("INIT_DATA_MAX_AGE_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_INIT_DATA_MAX_AGE_SECS);

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string()),
        );

        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        Self {
            database_url,
            bot_token,
            init_data_max_age_secs,
            port,
            cors_origins,
            static_dir,
            dev_mode: apply_cli_override(DevModeConfig::from_env()),
        }
    }

    /// Path of the SQLite file behind `database_url`, if it names one on disk
    pub fn sqlite_file_path(&self) -> Option<PathBuf> {
        let path_part = self.database_url.strip_prefix("sqlite://")?;
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if path_without_params.is_empty() || path_without_params.starts_with(':') {
            return None;
        }
        Some(PathBuf::from(path_without_params))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
