use super::handlers;
use axum::{routing::get, Router};

/// Creates the board router
pub fn board_routes() -> Router {
    Router::new().route("/api/data", get(handlers::get_board))
}
