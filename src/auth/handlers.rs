//! Authentication handlers

use axum::{extract::Extension, Json};
use tracing::info;

use super::extractors::AuthedUser;
use super::models::AuthResponse;
use super::services::UsersService;
use crate::common::{ApiError, SharedState};

/// POST /api/auth - Register or refresh the calling Telegram user
pub async fn auth_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<AuthResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(telegram_id = authed.telegram_id, "Authenticating user");

    let users_service = UsersService::new(state.db.clone());
    let user = users_service.upsert_user(&authed.identity()).await?;

    Ok(Json(AuthResponse { user }))
}
