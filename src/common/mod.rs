// Common module - shared types and utilities across all modules

pub mod config;
pub mod dev_mode;
pub mod error;
pub mod helpers;
pub mod migrations;
pub mod ordering;
pub mod responses;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::ApiError;
pub use helpers::{json_body, path_id, safe_token_log};
pub use responses::{ReorderResponse, SuccessResponse};
pub use state::{AppState, SharedState};
pub use validation::{ValidationResult, Validator};
