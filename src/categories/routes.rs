use super::handlers;
use axum::{
    routing::{patch, post, put},
    Router,
};

/// Creates the categories router
pub fn categories_routes() -> Router {
    Router::new()
        .route("/api/categories", post(handlers::create_category))
        .route("/api/categories/reorder", put(handlers::reorder_categories))
        .route(
            "/api/categories/:id",
            patch(handlers::rename_category).delete(handlers::delete_category),
        )
}
