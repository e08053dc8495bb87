//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use chrono::Utc;
use tracing::{debug, warn};

use super::init_data::{verify_init_data, TelegramIdentity};
use crate::common::{safe_token_log, ApiError, AppState, SharedState};

/// Header carrying `Telegram.WebApp.initData`
pub const INIT_DATA_HEADER: &str = "x-telegram-init-data";

/// Authenticated user extractor
///
/// Verifies the init-data header against the bot token, or returns the fixed
/// dev identity when the bypass is on. The user row is not loaded here; see
/// [`crate::auth::services::UsersService::require_user`].
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl From<TelegramIdentity> for AuthedUser {
    fn from(identity: TelegramIdentity) -> Self {
        Self {
            telegram_id: identity.telegram_id,
            first_name: identity.first_name,
            last_name: identity.last_name,
            username: identity.username,
        }
    }
}

impl AuthedUser {
    pub fn identity(&self) -> TelegramIdentity {
        TelegramIdentity {
            telegram_id: self.telegram_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
        }
    }
}

/// Resolves the caller's identity from request headers.
pub fn authenticate(
    headers: &HeaderMap,
    app_state: &AppState,
    now_unix: i64,
) -> Result<TelegramIdentity, ApiError> {
    // DEV MODE: Bypass validation completely
    if app_state.dev_mode.is_enabled() {
        let identity = app_state.dev_mode.dev_identity();
        debug!(
            telegram_id = identity.telegram_id,
            "DEV MODE: Authentication bypassed"
        );
        return Ok(identity);
    }

    let init_data = match headers.get(INIT_DATA_HEADER).and_then(|h| h.to_str().ok()) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            warn!("Authentication failed: missing init data header");
            return Err(ApiError::unauthorized());
        }
    };

    let bot_token = match app_state.bot_token.as_deref() {
        Some(token) => token,
        None => {
            warn!("Authentication failed: BOT_TOKEN is not configured");
            return Err(ApiError::unauthorized());
        }
    };

    verify_init_data(
        init_data,
        bot_token,
        app_state.init_data_max_age_secs,
        now_unix,
    )
    .map_err(|e| {
        warn!(
            error = %e,
            init_data = %safe_token_log(init_data),
            "Init data validation failed"
        );
        ApiError::unauthorized()
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Extension containing the AppState
        let Extension(state_lock): Extension<SharedState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let identity = authenticate(&parts.headers, &app_state, Utc::now().timestamp())?;

        debug!(
            telegram_id = identity.telegram_id,
            "User authentication successful via extractor"
        );

        Ok(identity.into())
    }
}
