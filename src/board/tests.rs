//! Tests for board module
//!
//! These tests verify:
//! - Ordering of categories and tasks (ties broken by id)
//! - The derived `done` flag at a given instant
//! - Unknown users and the response shape

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::init_data::TelegramIdentity;
    use crate::auth::UsersService;
    use crate::common::state::test_support::test_pool;
    use crate::common::ApiError;
    use crate::tasks::streak::test_support::SpringForward;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use sqlx::SqlitePool;

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
            .unwrap()
    }

    async fn seed_user(db: &SqlitePool, telegram_id: i64, username: Option<&str>) -> i64 {
        UsersService::new(db.clone())
            .upsert_user(&TelegramIdentity {
                telegram_id,
                first_name: "Ada".to_string(),
                last_name: None,
                username: username.map(str::to_string),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_category(db: &SqlitePool, user_id: i64, name: &str, order: i64) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO categories (user_id, name, sort_order) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .bind(order)
        .fetch_one(db)
        .await
        .unwrap()
    }

    async fn seed_task(
        db: &SqlitePool,
        category_id: i64,
        name: &str,
        order: i64,
        streak: i64,
        last: Option<DateTime<FixedOffset>>,
    ) -> i64 {
        sqlx::query_scalar(
            r#"
            INSERT INTO tasks (category_id, name, sort_order, streak, last_completed_at)
            VALUES (?, ?, ?, ?, ?) RETURNING id
            "#,
        )
        .bind(category_id)
        .bind(name)
        .bind(order)
        .bind(streak)
        .bind(last.map(|at| at.to_rfc3339()))
        .fetch_one(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let db = test_pool().await;

        let result = BoardService::new(db).load_board(404, &at(5, 12)).await;

        match result {
            Err(ApiError::NotFound(message)) => assert_eq!(message, "User not found"),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_new_user_has_empty_board() {
        let db = test_pool().await;
        seed_user(&db, 1, Some("ada")).await;

        let board = BoardService::new(db).load_board(1, &at(5, 12)).await.unwrap();

        assert_eq!(board.user.first_name, "Ada");
        assert_eq!(board.user.username.as_deref(), Some("ada"));
        assert!(board.categories.is_empty());
    }

    #[tokio::test]
    async fn test_categories_and_tasks_are_sorted_by_order_then_id() {
        let db = test_pool().await;
        let user_id = seed_user(&db, 1, None).await;
        let work = seed_category(&db, user_id, "Work", 1).await;
        let health = seed_category(&db, user_id, "Health", 0).await;
        let home = seed_category(&db, user_id, "Home", 1).await;

        seed_task(&db, health, "Stretch", 2, 0, None).await;
        seed_task(&db, health, "Run", 0, 0, None).await;
        seed_task(&db, health, "Read", 2, 0, None).await;

        let board = BoardService::new(db).load_board(1, &at(5, 12)).await.unwrap();

        let ids: Vec<i64> = board.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![health, work, home]);

        let names: Vec<&str> = board.categories[0]
            .tasks
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Run", "Stretch", "Read"]);
        assert!(board.categories[1].tasks.is_empty());
    }

    #[tokio::test]
    async fn test_done_reflects_calendar_day_of_last_completion() {
        let db = test_pool().await;
        let user_id = seed_user(&db, 1, None).await;
        let category = seed_category(&db, user_id, "Health", 0).await;
        seed_task(&db, category, "Today", 0, 3, Some(at(5, 0))).await;
        seed_task(&db, category, "Yesterday", 1, 7, Some(at(4, 23))).await;
        seed_task(&db, category, "Never", 2, 0, None).await;

        let board = BoardService::new(db).load_board(1, &at(5, 18)).await.unwrap();
        let tasks = &board.categories[0].tasks;

        assert!(tasks[0].done);
        assert_eq!(tasks[0].streak, 3);
        assert!(!tasks[1].done);
        assert_eq!(tasks[1].streak, 7, "streak is reported as stored");
        assert!(!tasks[2].done);
    }

    #[tokio::test]
    async fn test_done_uses_offset_of_the_completion_itself() {
        let db = test_pool().await;
        let user_id = seed_user(&db, 1, None).await;
        let category = seed_category(&db, user_id, "Health", 0).await;
        let task = seed_task(&db, category, "Run", 0, 3, None).await;
        sqlx::query("UPDATE tasks SET last_completed_at = '2024-03-30T23:30:00+01:00' WHERE id = ?")
            .bind(task)
            .execute(&db)
            .await
            .unwrap();

        // the clocks moved to +02:00 overnight; the completion was still on the 30th
        let now = SpringForward.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap();
        let board = BoardService::new(db).load_board(1, &now).await.unwrap();

        assert!(!board.categories[0].tasks[0].done);
        assert_eq!(board.categories[0].tasks[0].streak, 3);
    }

    #[tokio::test]
    async fn test_board_excludes_other_users() {
        let db = test_pool().await;
        let mine = seed_user(&db, 1, None).await;
        let theirs = seed_user(&db, 2, None).await;
        seed_category(&db, mine, "Mine", 0).await;
        let other = seed_category(&db, theirs, "Theirs", 0).await;
        seed_task(&db, other, "Secret", 0, 0, None).await;

        let board = BoardService::new(db).load_board(1, &at(5, 12)).await.unwrap();

        assert_eq!(board.categories.len(), 1);
        assert_eq!(board.categories[0].name, "Mine");
        assert!(board.categories[0].tasks.is_empty());
    }

    #[tokio::test]
    async fn test_board_serializes_wire_shape() {
        let db = test_pool().await;
        let user_id = seed_user(&db, 1, Some("ada")).await;
        let category = seed_category(&db, user_id, "Health", 0).await;
        seed_task(&db, category, "Run", 0, 2, Some(at(5, 8))).await;

        let board = BoardService::new(db).load_board(1, &at(5, 12)).await.unwrap();
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["user"]["firstName"], "Ada");
        assert_eq!(json["user"]["username"], "ada");
        assert_eq!(json["categories"][0]["order"], 0);
        assert_eq!(json["categories"][0]["tasks"][0]["done"], true);
        assert_eq!(json["categories"][0]["tasks"][0]["streak"], 2);
        assert!(json["categories"][0]["tasks"][0].get("lastCompletedAt").is_none());
    }
}
