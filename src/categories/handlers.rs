use super::models::{
    CategoryResponse, CreateCategoryRequest, RenameCategoryRequest, ReorderCategoriesRequest,
};
use super::services::CategoriesService;
use super::validators::CategoryValidator;
use crate::auth::{AuthedUser, UsersService};
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

// ============================================================================
// Category Handlers
// ============================================================================

/// POST /api/categories - Create a category at the end of the list
pub async fn create_category(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let user = UsersService::new(state.db.clone())
        .require_user(authed.telegram_id)
        .await?;

    let request = json_body(payload)?;
    let validation_result = CategoryValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            telegram_id = authed.telegram_id,
            errors = ?validation_result.errors,
            "Category creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }
    let name = request.name.unwrap_or_default();

    let category = CategoriesService::new(state.db.clone())
        .create_category(user.id, &name)
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// PATCH /api/categories/:id - Rename a category
pub async fn rename_category(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RenameCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let category_id = path_id(id)?;

    let request = json_body(payload)?;
    let validation_result = CategoryValidator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }
    let name = request.name.unwrap_or_default();

    let category = CategoriesService::new(state.db.clone())
        .rename_category(authed.telegram_id, category_id, &name)
        .await?;

    Ok(Json(CategoryResponse { category }))
}

/// DELETE /api/categories/:id - Delete a category and its tasks
pub async fn delete_category(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let category_id = path_id(id)?;

    CategoriesService::new(state.db.clone())
        .delete_category(authed.telegram_id, category_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// PUT /api/categories/reorder - Apply a full drag-and-drop order
pub async fn reorder_categories(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<ReorderCategoriesRequest>, JsonRejection>,
) -> Result<Json<ReorderResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let request = json_body(payload)?;
    let validation_result = CategoryValidator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }
    let ordered_ids = request.ordered_ids.unwrap_or_default();

    let user = UsersService::new(state.db.clone())
        .require_user(authed.telegram_id)
        .await?;

    let updated = CategoriesService::new(state.db.clone())
        .reorder_categories(user.id, &ordered_ids)
        .await?;

    Ok(Json(ReorderResponse::new(updated)))
}
