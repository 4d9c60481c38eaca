//! Shared response helpers for resource clients.
//!
//! Non-success statuses become [`ApiError::Http`] carrying the backend's
//! `detail` or `message` field when the body is JSON, or the status line
//! otherwise. Success bodies are decoded strictly.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Pass a success response through, turn anything else into [`ApiError::Http`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Decode a JSON body into `T`, rejecting missing or mistyped fields.
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await.map_err(ApiError::from_transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Human-readable message for an error response body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message"]
                .iter()
                .find_map(|key| value.get(key).and_then(describe))
        })
        .unwrap_or_else(|| status_line(status))
}

fn describe(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        // Validation errors arrive as a list of {loc, msg, type} objects.
        Value::Array(items) if !items.is_empty() => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(value.to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Object(map) if !map.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {}: {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}
