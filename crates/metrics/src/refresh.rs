//! The contract of the reload-check poll.

use std::time::Duration;

use serde_json::Value;

/// How often the dashboard asks whether a full reload is required.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(900_000);

const UPDATE_KEY: &str = "update";
const UPDATE_REQUESTED: &str = "yes";

/// Decodes the body of a reload-check response.
///
/// Only `{"update": "yes"}`, either as an object or as the first element of an
/// array, requests a reload. Any other value or malformed JSON does not.
pub fn reload_requested(body: &[u8]) -> bool {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => is_reload_signal(&value),
        Err(_) => false,
    }
}

pub fn is_reload_signal(value: &Value) -> bool {
    let signal = match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    signal
        .and_then(|s| s.get(UPDATE_KEY))
        .and_then(Value::as_str)
        .is_some_and(|update| update == UPDATE_REQUESTED)
}
