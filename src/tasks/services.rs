use super::models::{Task, ToggleResult};
use super::streak::{self, StreakState};
use crate::categories::services::owned_category;
use crate::common::ordering::{self, OrderScope};
use crate::common::ApiError;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, warn};

const TASK_COLUMNS: &str =
    "t.id, t.category_id, t.name, t.sort_order, t.streak, t.last_completed_at, t.created_at";

/// Loads a task only if its category belongs to `telegram_id`
async fn owned_task(
    conn: &mut SqliteConnection,
    telegram_id: i64,
    task_id: i64,
) -> Result<Task, ApiError> {
    let sql = format!(
        r#"
        SELECT {}
        FROM tasks t
        JOIN categories c ON c.id = t.category_id
        JOIN users u ON u.id = c.user_id
        WHERE t.id = ? AND u.telegram_id = ?
        "#,
        TASK_COLUMNS
    );

    sqlx::query_as::<_, Task>(&sql)
        .bind(task_id)
        .bind(telegram_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(ApiError::not_found)
}

/// Streak fields of a stored task, with the timestamp read in `now`'s zone.
/// The zone's offset is resolved for the stored instant itself, not taken
/// from `now`.
pub fn stored_streak<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> StreakState<Tz> {
    let last_completed_at = task.last_completed_at.as_deref().and_then(|raw| {
        let parsed = streak::parse_completed_at(raw, &now.timezone());
        if parsed.is_none() {
            warn!(task_id = task.id, value = %raw, "Unreadable completion timestamp, treating as never completed");
        }
        parsed
    });

    StreakState {
        streak: task.streak,
        last_completed_at,
    }
}

pub struct TasksService {
    db: SqlitePool,
}

impl TasksService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a task at the end of an owned category
    pub async fn create_task(
        &self,
        telegram_id: i64,
        category_id: i64,
        name: &str,
    ) -> Result<Task, ApiError> {
        let mut tx = self.db.begin().await?;

        owned_category(&mut *tx, telegram_id, category_id).await?;

        let position =
            ordering::append_position(&mut *tx, OrderScope::CategoryTasks(category_id)).await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (category_id, name, sort_order)
            VALUES (?, ?, ?)
            RETURNING id, category_id, name, sort_order, streak, last_completed_at, created_at
            "#,
        )
        .bind(category_id)
        .bind(name.trim())
        .bind(position)
        .fetch_one(&mut *tx)
        .await
        .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(
            category_id = category_id,
            task_id = task.id,
            order = position,
            "Created task"
        );

        Ok(task)
    }

    pub async fn rename_task(
        &self,
        telegram_id: i64,
        task_id: i64,
        name: &str,
    ) -> Result<Task, ApiError> {
        let mut tx = self.db.begin().await?;

        owned_task(&mut *tx, telegram_id, task_id).await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET name = ?
            WHERE id = ?
            RETURNING id, category_id, name, sort_order, streak, last_completed_at, created_at
            "#,
        )
        .bind(name.trim())
        .bind(task_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(task_id = task_id, "Renamed task");

        Ok(task)
    }

    pub async fn delete_task(&self, telegram_id: i64, task_id: i64) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await?;

        owned_task(&mut *tx, telegram_id, task_id).await?;

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(task_id = task_id, "Deleted task");

        Ok(())
    }

    /// Flips today's done state of a task and persists the new streak
    pub async fn toggle_task<Tz>(
        &self,
        telegram_id: i64,
        task_id: i64,
        now: &DateTime<Tz>,
    ) -> Result<ToggleResult, ApiError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut tx = self.db.begin().await?;

        let task = owned_task(&mut *tx, telegram_id, task_id).await?;
        let toggled = streak::toggle(&stored_streak(&task, now), now);

        sqlx::query("UPDATE tasks SET streak = ?, last_completed_at = ? WHERE id = ?")
            .bind(toggled.streak)
            .bind(toggled.last_completed_at.map(|at| at.to_rfc3339()))
            .bind(task_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        tx.commit().await?;

        info!(
            task_id = task_id,
            done = toggled.done,
            previous_streak = task.streak,
            streak = toggled.streak,
            "Toggled task"
        );

        Ok(ToggleResult {
            id: task_id,
            done: toggled.done,
            streak: toggled.streak,
        })
    }

    /// Applies a drag-and-drop order to the tasks of an owned category
    pub async fn reorder_tasks(
        &self,
        telegram_id: i64,
        category_id: i64,
        ordered_ids: &[i64],
    ) -> Result<u64, ApiError> {
        {
            let mut conn = self.db.acquire().await?;
            owned_category(&mut *conn, telegram_id, category_id).await?;
        }

        let updated =
            ordering::reorder(&self.db, OrderScope::CategoryTasks(category_id), ordered_ids)
                .await?;

        info!(
            category_id = category_id,
            requested = ordered_ids.len(),
            updated = updated,
            "Reordered tasks"
        );

        Ok(updated)
    }
}
