// Response bodies shared by several modules

use serde::Serialize;

/// `{"success": true}` for deletes
#[derive(Serialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Reorder acknowledgement; `updated` counts rows that actually moved into
/// place, so a stale id list shows up as `updated < orderedIds.len()`.
#[derive(Serialize, Debug)]
pub struct ReorderResponse {
    pub success: bool,
    pub updated: u64,
}

impl ReorderResponse {
    pub fn new(updated: u64) -> Self {
        Self {
            success: true,
            updated,
        }
    }
}
