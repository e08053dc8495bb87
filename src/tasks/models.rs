use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    #[serde(rename = "order")]
    pub sort_order: i64,
    pub streak: i64,
    pub last_completed_at: Option<String>, // RFC 3339, set by the last toggle-on
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameTaskRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksRequest {
    pub category_id: Option<i64>,
    pub ordered_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

/// Authoritative state after a toggle, used by the client to reconcile
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToggleResult {
    pub id: i64,
    pub done: bool,
    pub streak: i64,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub task: ToggleResult,
}
