//! Telegram Mini App init-data verification
//!
//! The client forwards `Telegram.WebApp.initData`, a form-encoded string whose
//! `hash` field is an HMAC-SHA256 over the remaining fields. The signing key is
//! itself `HMAC-SHA256("WebAppData", bot_token)`.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const WEB_APP_DATA_LABEL: &[u8] = b"WebAppData";

#[derive(Debug, Error)]
pub enum InitDataError {
    #[error("init data has no hash")]
    MissingHash,

    #[error("init data hash is not valid hex")]
    MalformedHash,

    #[error("init data is not valid form encoding")]
    MalformedEncoding,

    #[error("init data signature mismatch")]
    SignatureMismatch,

    #[error("auth_date is not a unix timestamp")]
    MalformedAuthDate,

    #[error("init data expired ({age_secs}s old)")]
    Expired { age_secs: i64 },

    #[error("init data has no user")]
    MissingUser,

    #[error("init data user is malformed: {0}")]
    MalformedUser(#[from] serde_json::Error),

    #[error("invalid signing key")]
    InvalidKey,
}

/// Verified identity of the Telegram user behind a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramIdentity {
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Deserialize)]
struct TelegramUser {
    id: i64,
    first_name: String,
    last_name: Option<String>,
    username: Option<String>,
}

fn form_decode(raw: &str) -> Result<String, InitDataError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| InitDataError::MalformedEncoding)
}

/// Splits init data into decoded `(key, value)` pairs, keeping duplicates and order.
pub fn parse_pairs(raw: &str) -> Result<Vec<(String, String)>, InitDataError> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((form_decode(key)?, form_decode(value)?))
        })
        .collect()
}

/// Canonical string that gets signed: pairs sorted by key, `key=value`, newline-joined.
pub fn data_check_string(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn signing_mac(bot_token: &str) -> Result<HmacSha256, InitDataError> {
    let mut secret_mac =
        HmacSha256::new_from_slice(WEB_APP_DATA_LABEL).map_err(|_| InitDataError::InvalidKey)?;
    secret_mac.update(bot_token.as_bytes());
    let secret_key = secret_mac.finalize().into_bytes();

    HmacSha256::new_from_slice(&secret_key).map_err(|_| InitDataError::InvalidKey)
}

/// Hex signature Telegram would attach to `check_string` for this bot.
pub fn sign(check_string: &str, bot_token: &str) -> Result<String, InitDataError> {
    let mut mac = signing_mac(bot_token)?;
    mac.update(check_string.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies `raw` init data and returns the user it was issued for.
///
/// `now_unix` is the current time in seconds; payloads whose `auth_date` is
/// more than `max_age_secs` older are rejected.
pub fn verify_init_data(
    raw: &str,
    bot_token: &str,
    max_age_secs: i64,
    now_unix: i64,
) -> Result<TelegramIdentity, InitDataError> {
    let mut pairs = parse_pairs(raw)?;

    let hash_index = pairs
        .iter()
        .position(|(key, _)| key == "hash")
        .ok_or(InitDataError::MissingHash)?;
    let (_, hash) = pairs.remove(hash_index);
    // a second `hash` would otherwise be signed as data
    pairs.retain(|(key, _)| key != "hash");

    let expected = hex::decode(hash.trim()).map_err(|_| InitDataError::MalformedHash)?;

    let mut mac = signing_mac(bot_token)?;
    mac.update(data_check_string(&pairs).as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| InitDataError::SignatureMismatch)?;

    if let Some((_, auth_date)) = pairs.iter().find(|(key, _)| key == "auth_date") {
        let issued_at = auth_date
            .trim()
            .parse::<i64>()
            .map_err(|_| InitDataError::MalformedAuthDate)?;
        let age_secs = now_unix - issued_at;
        if age_secs > max_age_secs {
            return Err(InitDataError::Expired { age_secs });
        }
    }

    let user_json = pairs
        .iter()
        .find(|(key, _)| key == "user")
        .map(|(_, value)| value.as_str())
        .ok_or(InitDataError::MissingUser)?;

    let user: TelegramUser = serde_json::from_str(user_json)?;

    Ok(TelegramIdentity {
        telegram_id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        username: user.username,
    })
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Builds a correctly signed init-data string for tests.
    pub fn signed_init_data(bot_token: &str, auth_date: i64, user_json: &str) -> String {
        let pairs = vec![
            ("auth_date".to_string(), auth_date.to_string()),
            ("query_id".to_string(), "AAHdF6IQAAAAAN0XohDhrOrc".to_string()),
            ("user".to_string(), user_json.to_string()),
        ];
        let hash = sign(&data_check_string(&pairs), bot_token).unwrap();

        format!(
            "query_id={}&user={}&auth_date={}&hash={}",
            urlencoding::encode(&pairs[1].1),
            urlencoding::encode(user_json),
            auth_date,
            hash
        )
    }
}
