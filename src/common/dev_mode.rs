// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing Telegram init-data validation when running outside the Telegram client

use std::env;

use crate::auth::init_data::TelegramIdentity;

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub telegram_id: i64,
    pub first_name: String,
    pub username: String,
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env_flag("SKIP_TG_VALIDATION") || env_flag("DEV_MODE");

        let telegram_id = env::var("DEV_TELEGRAM_ID")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(1);

        let first_name = env::var("DEV_FIRST_NAME").unwrap_or_else(|_| "Dev".to_string());

        let username = env::var("DEV_USERNAME").unwrap_or_else(|_| "dev".to_string());

        Self {
            enabled,
            telegram_id,
            first_name,
            username,
        }
    }

    /// A config with the bypass switched off and the default dev identity.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            telegram_id: 1,
            first_name: "Dev".to_string(),
            username: "dev".to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The fixed identity every request resolves to while the bypass is on
    pub fn dev_identity(&self) -> TelegramIdentity {
        TelegramIdentity {
            telegram_id: self.telegram_id,
            first_name: self.first_name.clone(),
            last_name: None,
            username: Some(self.username.clone()),
        }
    }
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
        println!("   Telegram init-data validation bypassed");
        println!(
            "   Dev User: {} (@{}, telegram id {})",
            config.first_name, config.username, config.telegram_id
        );
        println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
        println!();
    } else {
        println!("🔒 Production mode - Telegram init data required");
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    let mut result = None;
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => result = Some(true),
            "--no-dev" | "--prod" | "--production" => result = Some(false),
            _ => {}
        }
    }

    result
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args().skip(1)) {
        println!("🔧 CLI override: DEV_MODE = {}", cli_dev_mode);
        config.enabled = cli_dev_mode;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_dev_mode_args() {
        assert_eq!(parse_dev_mode_args(args(&["--dev"])), Some(true));
        assert_eq!(parse_dev_mode_args(args(&["--prod"])), Some(false));
        assert_eq!(parse_dev_mode_args(args(&["--port", "80"])), None);
        // last flag wins
        assert_eq!(parse_dev_mode_args(args(&["--dev", "--no-dev"])), Some(false));
    }

    #[test]
    fn test_dev_identity_uses_configured_user() {
        let config = DevModeConfig {
            enabled: true,
            telegram_id: 42,
            first_name: "Tester".to_string(),
            username: "tester".to_string(),
        };

        let identity = config.dev_identity();
        assert_eq!(identity.telegram_id, 42);
        assert_eq!(identity.first_name, "Tester");
        assert_eq!(identity.username.as_deref(), Some("tester"));
        assert!(identity.last_name.is_none());
    }

    #[test]
    fn test_disabled_config() {
        let config = DevModeConfig::disabled();
        assert!(!config.is_enabled());
        assert_eq!(config.dev_identity().telegram_id, 1);
    }
}
