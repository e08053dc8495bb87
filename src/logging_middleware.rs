// src/logging_middleware.rs
//! Request logging: one line per request with status and latency, plus the
//! JSON bodies at debug level.
//!
//! Init data travels in a header, never in a body, so bodies are safe to log.
//! Header values are never logged here. Only bodies of known, bounded length
//! are buffered; everything else streams through unlogged, so the log level
//! never changes what the server accepts.

use axum::body::{to_bytes, HttpBody};
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, Level};

/// Largest body buffered for logging. Bigger or unsized bodies pass through.
const MAX_BUFFERED_BODY_BYTES: usize = 1024 * 1024;

/// Logged bodies are cut to this many characters
const MAX_LOGGED_BODY_CHARS: usize = 2048;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.starts_with("application/json"))
}

/// Whether a body with this exact length hint can be buffered for the log
fn fits_log_buffer(exact_len: Option<u64>) -> bool {
    exact_len.map_or(false, |len| len <= MAX_BUFFERED_BODY_BYTES as u64)
}

/// Compact rendering of a body for the log, cut at a char boundary
fn body_for_log(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    let compact = serde_json::from_str::<serde_json::Value>(text)
        .map(|json| json.to_string())
        .unwrap_or_else(|_| text.to_string());

    if compact.chars().count() <= MAX_LOGGED_BODY_CHARS {
        return Some(compact);
    }
    let cut: String = compact.chars().take(MAX_LOGGED_BODY_CHARS).collect();
    Some(format!("{}… ({} bytes)", cut, bytes.len()))
}

/// Middleware logging every request, and the JSON bodies when debug is on
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let started = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let log_bodies = tracing::enabled!(Level::DEBUG);

    let request = if log_bodies
        && is_json(request.headers())
        && fits_log_buffer(request.body().size_hint().exact())
    {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, MAX_BUFFERED_BODY_BYTES)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        if let Some(body) = body_for_log(&bytes) {
            debug!(method = %method, uri = %uri, request_body = %body, "Request");
        }
        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    let response = next.run(request).await;
    let status = response.status();

    let response = if log_bodies
        && is_json(response.headers())
        && fits_log_buffer(response.body().size_hint().exact())
    {
        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, MAX_BUFFERED_BODY_BYTES)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        if let Some(body) = body_for_log(&bytes) {
            debug!(status = %status, response_body = %body, "Response");
        }
        Response::from_parts(parts, Body::from(bytes))
    } else {
        response
    };

    info!(
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Handled request"
    );

    Ok(response)
}
