//! Tool error taxonomy
//!
//! Every failure a tool call can surface is a [`ToolError`] of one of five
//! [`ErrorKind`]s. The serialized form is fixed so agents can rely on it:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "code": 400,
//!     "message": "Unknown tool: 'foo'",
//!     "details": {},
//!     "suggestions": []
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Suggestion attached to connection errors when none is given.
pub const CONNECTION_SUGGESTION: &str = "Check that the OpenFisca server is running";

/// Kind of a tool error.
///
/// | Kind | Wire type | Default code |
/// |------|-----------|:---:|
/// | `Validation` | `validation_error` | 400 |
/// | `NotFound` | `not_found_error` | 404 |
/// | `Dependency` | `dependency_error` | 500 |
/// | `Connection` | `connection_error` | 503 |
/// | `Internal` | `internal_error` | 500 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or unknown input
    #[serde(rename = "validation_error")]
    Validation,
    /// Unknown resource (variable, parameter)
    #[serde(rename = "not_found_error")]
    NotFound,
    /// Circular or unsatisfiable calculation graph
    #[serde(rename = "dependency_error")]
    Dependency,
    /// Rule engine unreachable
    #[serde(rename = "connection_error")]
    Connection,
    /// Unexpected failure
    #[serde(rename = "internal_error")]
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found_error",
            ErrorKind::Dependency => "dependency_error",
            ErrorKind::Connection => "connection_error",
            ErrorKind::Internal => "internal_error",
        }
    }

    /// Status code used when no explicit code is given.
    pub fn default_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Dependency | ErrorKind::Internal => 500,
            ErrorKind::Connection => 503,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tool error carrying kind, status code, message, details and suggestions.
///
/// `details` and `suggestions` are always present (possibly empty), so the
/// serialized shape never changes between kinds.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(into = "ErrorEnvelope", from = "ErrorEnvelope")]
#[error("[{kind}] {message}")]
pub struct ToolError {
    pub kind: ErrorKind,
    pub code: u16,
    pub message: String,
    pub details: Map<String, Value>,
    pub suggestions: Vec<String>,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let suggestions = match kind {
            ErrorKind::Connection => vec![CONNECTION_SUGGESTION.to_string()],
            _ => Vec::new(),
        };
        Self {
            kind,
            code: kind.default_code(),
            message: message.into(),
            details: Map::new(),
            suggestions,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn dependency(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Dependency, message)
    }

    /// Connection error with the default "server is running" suggestion.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Replace the suggestions, including any kind default.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// The fixed `{error: {...}}` shape as a JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "error": {
                "type": self.kind.as_str(),
                "code": self.code,
                "message": self.message,
                "details": self.details,
                "suggestions": self.suggestions,
            }
        })
    }
}

/// Wire envelope: `{"error": {...}}`.
#[derive(Serialize, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: ErrorKind,
    code: u16,
    message: String,
    #[serde(default)]
    details: Map<String, Value>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl From<ToolError> for ErrorEnvelope {
    fn from(error: ToolError) -> Self {
        Self {
            error: ErrorBody {
                kind: error.kind,
                code: error.code,
                message: error.message,
                details: error.details,
                suggestions: error.suggestions,
            },
        }
    }
}

impl From<ErrorEnvelope> for ToolError {
    fn from(envelope: ErrorEnvelope) -> Self {
        let body = envelope.error;
        Self {
            kind: body.kind,
            code: body.code,
            message: body.message,
            details: body.details,
            suggestions: body.suggestions,
        }
    }
}
