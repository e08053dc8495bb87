use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUser {
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardTask {
    pub id: i64,
    pub name: String,
    pub order: i64,
    pub done: bool,
    pub streak: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardCategory {
    pub id: i64,
    pub name: String,
    pub order: i64,
    pub tasks: Vec<BoardTask>,
}

/// Response of `GET /api/data`
#[derive(Debug, Clone, Serialize)]
pub struct BoardResponse {
    pub user: BoardUser,
    pub categories: Vec<BoardCategory>,
}
