//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderValue, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Request and response bodies longer than this many bytes are truncated in
/// `info` logs. The full body is logged at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

/// JSON fields that carry secrets and must never reach the logs.
const SECRET_FIELDS: [&str; 4] = ["password", "currentPassword", "newPassword", "token"];

/// Log the request and response for each request.
///
/// Passwords and tokens in JSON bodies and the `Authorization` header are
/// redacted before anything is logged. Bodies are passed on byte for byte.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let mut display_headers = parts.headers.clone();
    if display_headers.contains_key(AUTHORIZATION) {
        display_headers.insert(AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }
    log_body(
        &format!(
            "Received request: {} {}\nheaders: {display_headers:#?}",
            parts.method, parts.uri
        ),
        &redact_secrets(&String::from_utf8_lossy(&body_bytes)),
    );

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_body(
        &format!("Sending response: {}", parts.status),
        &redact_secrets(&String::from_utf8_lossy(&body_bytes)),
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Replace the value of every secret field in a JSON body, at any depth.
///
/// Bodies that are not JSON are returned unchanged.
fn redact_secrets(body: &str) -> String {
    let Ok(mut value) = serde_json::from_str::<Value>(body) else {
        return body.to_owned();
    };

    if !redact_value(&mut value) {
        return body.to_owned();
    }

    value.to_string()
}

fn redact_value(value: &mut Value) -> bool {
    match value {
        Value::Object(map) => {
            let mut redacted = false;
            for (key, field) in map.iter_mut() {
                if SECRET_FIELDS.contains(&key.as_str()) {
                    *field = Value::String(REDACTED.to_owned());
                    redacted = true;
                } else {
                    redacted |= redact_value(field);
                }
            }
            redacted
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |redacted, item| redact_value(item) | redacted),
        _ => false,
    }
}

fn log_body(message: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{message}\nbody: {}...", truncate(body));
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{message}\nbody: {body:?}");
    }
}

/// Cut `text` to at most [LOG_BODY_LENGTH_LIMIT] bytes on a char boundary.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}
