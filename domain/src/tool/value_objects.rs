//! Tool domain value objects: the outcome of a tool invocation
//!
//! Every invocation yields a [`ToolOutput`]: either the successful JSON payload
//! or a [`ToolError`] in the shared error envelope. Both render to text the
//! same way regardless of which tool produced them.

use crate::core::error::ToolError;
use serde_json::Value;

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Success(Value),
    Failure(ToolError),
}

impl ToolOutput {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success(value.into())
    }

    pub fn failure(error: ToolError) -> Self {
        Self::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error(&self) -> Option<&ToolError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// JSON form: the payload itself, or the error envelope.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(value) => value.clone(),
            Self::Failure(err) => err.to_json(),
        }
    }

    /// Text form handed back to the caller.
    ///
    /// Objects and arrays are pretty-printed, strings pass through verbatim,
    /// other scalars use their compact JSON form. Errors are always the
    /// pretty-printed envelope.
    pub fn render(&self) -> String {
        match self {
            Self::Success(Value::String(text)) => text.clone(),
            Self::Success(value @ (Value::Object(_) | Value::Array(_))) => pretty(value),
            Self::Success(value) => value.to_string(),
            Self::Failure(err) => pretty(&err.to_json()),
        }
    }
}

impl From<Result<Value, ToolError>> for ToolOutput {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(err),
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
