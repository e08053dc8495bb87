use super::handlers;
use axum::{
    routing::{patch, post, put},
    Router,
};

/// Creates the tasks router
pub fn tasks_routes() -> Router {
    Router::new()
        .route("/api/tasks", post(handlers::create_task))
        .route("/api/tasks/reorder", put(handlers::reorder_tasks))
        .route(
            "/api/tasks/:id",
            patch(handlers::rename_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
}
