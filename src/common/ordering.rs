// src/common/ordering.rs
//! Sibling ordering for categories (per user) and tasks (per category)
//!
//! Every scope keeps integer positions in `sort_order`. Appends go after the
//! current maximum, reorders rewrite the whole scope as `0..n` in a single
//! transaction. Deletes leave gaps; only the maximum matters for appends and
//! every reader sorts ascending.

use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashSet;
use tracing::debug;

/// A sibling set in which `sort_order` is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// All categories of one user (by internal user id)
    UserCategories(i64),
    /// All tasks of one category
    CategoryTasks(i64),
}

impl OrderScope {
    fn table(self) -> &'static str {
        match self {
            OrderScope::UserCategories(_) => "categories",
            OrderScope::CategoryTasks(_) => "tasks",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            OrderScope::UserCategories(_) => "user_id",
            OrderScope::CategoryTasks(_) => "category_id",
        }
    }

    fn owner_id(self) -> i64 {
        match self {
            OrderScope::UserCategories(id) | OrderScope::CategoryTasks(id) => id,
        }
    }
}

/// Position for a new member given the scope's current maximum.
pub fn next_position(current_max: Option<i64>) -> i64 {
    current_max.map_or(0, |max| max + 1)
}

/// Pairs each id with its index in the requested order.
pub fn assign_positions(ordered_ids: &[i64]) -> Vec<(i64, i64)> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i64))
        .collect()
}

/// Position a new member of `scope` should receive.
///
/// Run it on the same transaction as the insert so two concurrent appends
/// cannot read the same maximum.
pub async fn append_position(
    conn: &mut SqliteConnection,
    scope: OrderScope,
) -> Result<i64, sqlx::Error> {
    let sql = format!(
        "SELECT MAX(sort_order) FROM {} WHERE {} = ?",
        scope.table(),
        scope.owner_column()
    );

    let current_max: Option<i64> = sqlx::query_scalar(&sql)
        .bind(scope.owner_id())
        .fetch_one(&mut *conn)
        .await?;

    Ok(next_position(current_max))
}

/// Rewrites positions of `scope` so the i-th id gets position `i`.
///
/// Ids outside the scope match no row and are skipped. A repeated id ends up at
/// its last position. Returns how many distinct rows were repositioned. All
/// updates commit together or not at all.
pub async fn reorder(
    pool: &SqlitePool,
    scope: OrderScope,
    ordered_ids: &[i64],
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET sort_order = ? WHERE id = ? AND {} = ?",
        scope.table(),
        scope.owner_column()
    );

    let mut tx = pool.begin().await?;
    let mut moved: HashSet<i64> = HashSet::new();

    for (id, position) in assign_positions(ordered_ids) {
        let result = sqlx::query(&sql)
            .bind(position)
            .bind(id)
            .bind(scope.owner_id())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() > 0 {
            moved.insert(id);
        }
    }

    tx.commit().await?;
    let updated = moved.len() as u64;

    debug!(
        scope = ?scope,
        requested = ordered_ids.len(),
        updated = updated,
        "Reordered scope"
    );

    Ok(updated)
}
