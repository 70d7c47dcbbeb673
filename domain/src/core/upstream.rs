//! Normalization of rule engine error payloads.
//!
//! The engine reports failures in a few shapes:
//!
//! - `{"error": "message"}` for whole-request failures
//! - `{"persons/alice/salary": "message", ...}` for field-level errors keyed
//!   by JSON-pointer-like paths
//! - anything else
//!
//! [`normalize_api_error`] maps each shape to exactly one [`ToolError`].

use super::error::ToolError;
use serde_json::{Map, Value};

/// Suggestion attached to field-level validation errors.
pub const FIELD_ERROR_SUGGESTION: &str = "Check the field path and value format";

/// Convert an engine error body and status into a [`ToolError`].
///
/// Rules, first match wins:
/// 1. `{"error": <string>}` → not found for 404, validation otherwise
/// 2. any key other than `"error"` → validation error at the first such key,
///    with all of them in `details.field_errors`
/// 3. otherwise → generic validation error with `details.raw_response`
pub fn normalize_api_error(body: &Value, status: u16) -> ToolError {
    if let Some(object) = body.as_object() {
        if let Some(message) = object.get("error").and_then(Value::as_str) {
            return if status == 404 {
                ToolError::not_found(message)
            } else {
                ToolError::validation(message)
            };
        }

        let field_errors: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| is_field_path(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some((path, message)) = field_errors.iter().next() {
            return ToolError::validation(format!(
                "Validation error at {}: {}",
                path,
                message_text(message)
            ))
            .with_detail("field_errors", Value::Object(field_errors.clone()))
            .with_suggestions([FIELD_ERROR_SUGGESTION]);
        }
    }

    ToolError::validation("API returned an error").with_detail("raw_response", body.clone())
}

/// A key names a field when it is a path or anything but the literal `error`.
fn is_field_path(key: &str) -> bool {
    key.contains('/') || key != "error"
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
