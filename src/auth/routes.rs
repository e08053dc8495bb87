//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth` - Upsert the user behind the init data
pub fn auth_routes() -> Router {
    Router::new().route("/api/auth", post(handlers::auth_handler))
}
