use super::models::{BoardCategory, BoardResponse, BoardTask, BoardUser};
use crate::auth::UsersService;
use crate::categories::models::Category;
use crate::common::ApiError;
use crate::tasks::models::Task;
use crate::tasks::services::stored_streak;
use crate::tasks::streak;
use chrono::{DateTime, TimeZone};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

pub struct BoardService {
    db: SqlitePool,
}

impl BoardService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Loads everything the user owns, with `done` evaluated at `now`
    pub async fn load_board<Tz: TimeZone>(
        &self,
        telegram_id: i64,
        now: &DateTime<Tz>,
    ) -> Result<BoardResponse, ApiError> {
        let user = UsersService::new(self.db.clone())
            .require_user(telegram_id)
            .await?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, sort_order, created_at
            FROM categories
            WHERE user_id = ?
            ORDER BY sort_order, id
            "#,
        )
        .bind(user.id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.category_id, t.name, t.sort_order, t.streak, t.last_completed_at, t.created_at
            FROM tasks t
            JOIN categories c ON c.id = t.category_id
            WHERE c.user_id = ?
            ORDER BY t.sort_order, t.id
            "#,
        )
        .bind(user.id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let mut by_category: HashMap<i64, Vec<BoardTask>> = HashMap::new();
        for task in &tasks {
            let state = stored_streak(task, now);
            by_category
                .entry(task.category_id)
                .or_default()
                .push(BoardTask {
                    id: task.id,
                    name: task.name.clone(),
                    order: task.sort_order,
                    done: streak::is_done(state.last_completed_at.as_ref(), now),
                    streak: task.streak,
                });
        }

        let categories: Vec<BoardCategory> = categories
            .into_iter()
            .map(|category| BoardCategory {
                tasks: by_category.remove(&category.id).unwrap_or_default(),
                id: category.id,
                name: category.name,
                order: category.sort_order,
            })
            .collect();

        debug!(
            telegram_id = telegram_id,
            categories = categories.len(),
            tasks = tasks.len(),
            "Loaded board"
        );

        Ok(BoardResponse {
            user: BoardUser {
                first_name: user.first_name,
                username: user.username,
            },
            categories,
        })
    }
}
