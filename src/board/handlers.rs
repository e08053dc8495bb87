use super::models::BoardResponse;
use super::services::BoardService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, SharedState};
use crate::tasks::streak::server_now;
use axum::{extract::Extension, Json};

/// GET /api/data - Everything the client needs to render the board
pub async fn get_board(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<BoardResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let board = BoardService::new(state.db.clone())
        .load_board(authed.telegram_id, &server_now())
        .await?;

    Ok(Json(board))
}
