use super::models::Category;
use crate::common::ordering::{self, OrderScope};
use crate::common::ApiError;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

/// Loads a category only if it belongs to `telegram_id`.
///
/// Missing and foreign categories both come back as 404.
pub async fn owned_category(
    conn: &mut SqliteConnection,
    telegram_id: i64,
    category_id: i64,
) -> Result<Category, ApiError> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT c.id, c.user_id, c.name, c.sort_order, c.created_at
        FROM categories c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = ? AND u.telegram_id = ?
        "#,
    )
    .bind(category_id)
    .bind(telegram_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(ApiError::not_found)
}

pub struct CategoriesService {
    db: SqlitePool,
}

impl CategoriesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a category at the end of the user's list
    pub async fn create_category(&self, user_id: i64, name: &str) -> Result<Category, ApiError> {
        let mut tx = self.db.begin().await?;

        let position = ordering::append_position(&mut *tx, OrderScope::UserCategories(user_id)).await?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, sort_order)
            VALUES (?, ?, ?)
            RETURNING id, user_id, name, sort_order, created_at
            "#,
        )
        .bind(user_id)
        .bind(name.trim())
        .bind(position)
        .fetch_one(&mut *tx)
        .await
        .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(
            user_id = user_id,
            category_id = category.id,
            order = position,
            "Created category"
        );

        Ok(category)
    }

    pub async fn rename_category(
        &self,
        telegram_id: i64,
        category_id: i64,
        name: &str,
    ) -> Result<Category, ApiError> {
        let mut tx = self.db.begin().await?;

        owned_category(&mut *tx, telegram_id, category_id).await?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = ?
            WHERE id = ?
            RETURNING id, user_id, name, sort_order, created_at
            "#,
        )
        .bind(name.trim())
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(category_id = category_id, "Renamed category");

        Ok(category)
    }

    /// Deletes a category together with its tasks. Sibling positions are left as-is.
    pub async fn delete_category(&self, telegram_id: i64, category_id: i64) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await?;

        owned_category(&mut *tx, telegram_id, category_id).await?;

        let tasks = sqlx::query("DELETE FROM tasks WHERE category_id = ?")
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(
            category_id = category_id,
            deleted_tasks = tasks.rows_affected(),
            "Deleted category"
        );

        Ok(())
    }

    /// Applies a drag-and-drop order to all of the user's categories
    pub async fn reorder_categories(&self, user_id: i64, ordered_ids: &[i64]) -> Result<u64, ApiError> {
        let updated = ordering::reorder(&self.db, OrderScope::UserCategories(user_id), ordered_ids).await?;

        info!(
            user_id = user_id,
            requested = ordered_ids.len(),
            updated = updated,
            "Reordered categories"
        );

        Ok(updated)
    }
}
