use super::models::{
    CreateTaskRequest, RenameTaskRequest, ReorderTasksRequest, TaskResponse, ToggleResponse,
};
use super::services::TasksService;
use super::streak::server_now;
use super::validators::TaskValidator;
use crate::auth::AuthedUser;
use crate::common::{
    json_body, path_id, ApiError, ReorderResponse, SharedState, SuccessResponse, Validator,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    http::StatusCode,
    Json,
};
use tracing::warn;

/// POST /api/tasks - Create a task at the end of a category
pub async fn create_task(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let request = json_body(payload)?;
    let validation_result = TaskValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            telegram_id = authed.telegram_id,
            errors = ?validation_result.errors,
            "Task creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }
    let category_id = request.category_id.unwrap_or_default();
    let name = request.name.unwrap_or_default();

    let task = TasksService::new(state.db.clone())
        .create_task(authed.telegram_id, category_id, &name)
        .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// PATCH /api/tasks/:id - Rename a task
pub async fn rename_task(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RenameTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let task_id = path_id(id)?;

    let request = json_body(payload)?;
    let validation_result = TaskValidator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }
    let name = request.name.unwrap_or_default();

    let task = TasksService::new(state.db.clone())
        .rename_task(authed.telegram_id, task_id, &name)
        .await?;

    Ok(Json(TaskResponse { task }))
}

/// DELETE /api/tasks/:id - Delete a task; its streak is lost
pub async fn delete_task(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let task_id = path_id(id)?;

    TasksService::new(state.db.clone())
        .delete_task(authed.telegram_id, task_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/tasks/:id/toggle - Mark done for today, or undo today's mark
pub async fn toggle_task(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let task_id = path_id(id)?;

    let task = TasksService::new(state.db.clone())
        .toggle_task(authed.telegram_id, task_id, &server_now())
        .await?;

    Ok(Json(ToggleResponse { task }))
}

/// PUT /api/tasks/reorder - Apply a full drag-and-drop order within a category
pub async fn reorder_tasks(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<ReorderTasksRequest>, JsonRejection>,
) -> Result<Json<ReorderResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let request = json_body(payload)?;
    let validation_result = TaskValidator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }
    let category_id = request.category_id.unwrap_or_default();
    let ordered_ids = request.ordered_ids.unwrap_or_default();

    let updated = TasksService::new(state.db.clone())
        .reorder_tasks(authed.telegram_id, category_id, &ordered_ids)
        .await?;

    Ok(Json(ReorderResponse::new(updated)))
}
