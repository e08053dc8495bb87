// Helper functions for safe logging and request parsing

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};
use tracing::debug;

use super::ApiError;

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
///
/// # Example
/// ```ignore
/// let masked = safe_token_log("query_id=AAHdF6IQ&user=...&hash=c501b71e");
/// // Returns: "quer...b71e"
/// ```
pub fn safe_token_log(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

/// Unwraps a JSON body, turning a malformed or mistyped payload into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected request body");
            Err(ApiError::BadRequest("Invalid JSON body".to_string()))
        }
    }
}

/// Unwraps a numeric path id. Anything unparseable cannot name an owned
/// entity, so it gets the same 404 as a foreign id.
pub fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected path id");
            Err(ApiError::not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_token_log_masks_middle() {
        assert_eq!(safe_token_log("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(safe_token_log("short"), "***");
    }

    #[test]
    fn test_safe_token_log_handles_multibyte() {
        assert_eq!(safe_token_log("ééééééééé"), "éééé...éééé");
    }

    #[test]
    fn test_path_id_passes_through() {
        assert_eq!(path_id(Ok(Path(7))).unwrap(), 7);
    }
}
