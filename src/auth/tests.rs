//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Identity resolution from the init-data header
//! - Dev mode bypass
//! - User upsert on sign-in

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::extractors::{authenticate, INIT_DATA_HEADER};
    use crate::auth::init_data::test_support::signed_init_data;
    use crate::auth::init_data::TelegramIdentity;
    use crate::common::dev_mode::DevModeConfig;
    use crate::common::state::test_support::{test_state, TEST_BOT_TOKEN};
    use crate::common::{ApiError, AppState};
    use axum::extract::Extension;
    use axum::http::{HeaderMap, HeaderValue};

    const NOW: i64 = 1_700_000_000;
    const USER: &str = r#"{"id":555,"first_name":"Anna","username":"anna"}"#;

    fn headers_with(init_data: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(INIT_DATA_HEADER, HeaderValue::from_str(init_data).unwrap());
        headers
    }

    async fn plain_state() -> AppState {
        test_state().await.read().await.clone()
    }

    fn anna() -> AuthedUser {
        AuthedUser {
            telegram_id: 555,
            first_name: "Anna".to_string(),
            last_name: None,
            username: Some("anna".to_string()),
        }
    }

    // ============================================================================
    // Identity resolution
    // ============================================================================

    #[tokio::test]
    async fn test_authenticate_with_valid_header() {
        let state = plain_state().await;
        let headers = headers_with(&signed_init_data(TEST_BOT_TOKEN, NOW - 10, USER));

        let identity = authenticate(&headers, &state, NOW).unwrap();
        assert_eq!(
            identity,
            TelegramIdentity {
                telegram_id: 555,
                first_name: "Anna".to_string(),
                last_name: None,
                username: Some("anna".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_authenticate_without_header_is_unauthorized() {
        let state = plain_state().await;
        let result = authenticate(&HeaderMap::new(), &state, NOW);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_authenticate_without_bot_token_is_unauthorized() {
        let mut state = plain_state().await;
        state.bot_token = None;
        let headers = headers_with(&signed_init_data(TEST_BOT_TOKEN, NOW, USER));

        let result = authenticate(&headers, &state, NOW);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_authenticate_with_expired_header_is_unauthorized() {
        let state = plain_state().await;
        let headers = headers_with(&signed_init_data(TEST_BOT_TOKEN, NOW - 7200, USER));

        let result = authenticate(&headers, &state, NOW);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_dev_mode_bypasses_validation() {
        let mut state = plain_state().await;
        state.dev_mode = DevModeConfig {
            enabled: true,
            ..DevModeConfig::disabled()
        };

        let identity = authenticate(&HeaderMap::new(), &state, NOW).unwrap();
        assert_eq!(identity.telegram_id, 1);
        assert_eq!(identity.first_name, "Dev");
        assert_eq!(identity.username.as_deref(), Some("dev"));
    }

    // ============================================================================
    // Sign-in
    // ============================================================================

    #[tokio::test]
    async fn test_auth_handler_creates_then_updates_user() {
        let state = test_state().await;

        let first = handlers::auth_handler(Extension(state.clone()), anna())
            .await
            .unwrap()
            .0
            .user;
        assert_eq!(first.telegram_id, 555);
        assert_eq!(first.first_name, "Anna");

        let renamed = AuthedUser {
            first_name: "Annie".to_string(),
            ..anna()
        };
        let second = handlers::auth_handler(Extension(state.clone()), renamed)
            .await
            .unwrap()
            .0
            .user;

        assert_eq!(second.id, first.id, "upsert must not create a second row");
        assert_eq!(second.first_name, "Annie");
    }

    #[tokio::test]
    async fn test_require_user_before_sign_in_is_not_found() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        let result = UsersService::new(db).require_user(999).await;
        assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg == "User not found"));
    }

    #[test]
    fn test_auth_response_serializes_camel_case() {
        let response = models::AuthResponse {
            user: models::User {
                id: 1,
                telegram_id: 555,
                first_name: "Anna".to_string(),
                last_name: None,
                username: Some("anna".to_string()),
                created_at: "2024-01-01 00:00:00".to_string(),
                updated_at: "2024-01-01 00:00:00".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["telegramId"], 555);
        assert_eq!(json["user"]["firstName"], "Anna");
        assert!(json["user"]["lastName"].is_null());
    }
}
