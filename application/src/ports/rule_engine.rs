//! Rule engine port
//!
//! Defines the interface to the tax-benefit engine's HTTP API.

use async_trait::async_trait;
use fisca_domain::{Situation, ToolError};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur talking to the rule engine
///
/// Only [`EngineError::Tool`] belongs to the error taxonomy. Every other
/// variant is an unexpected failure and surfaces to callers as an
/// `internal_error`.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Connection failure or normalized engine error, passed through unchanged
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A successful response whose body is not valid JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Any other transport failure (body read, redirect loop, ...)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl EngineError {
    /// Map into the taxonomy: taxonomy errors unchanged, the rest internal.
    pub fn into_tool_error(self) -> ToolError {
        match self {
            EngineError::Tool(err) => err,
            other => ToolError::internal(other.to_string()),
        }
    }

    pub fn is_taxonomy(&self) -> bool {
        matches!(self, EngineError::Tool(_))
    }
}

/// Gateway to the rule engine
///
/// One method per engine endpoint. Implementations make exactly one attempt
/// per call: connectivity failures become connection errors, failure statuses
/// are normalized, and success bodies are returned decoded.
#[async_trait]
pub trait RuleEngine: Send + Sync {
    /// `GET /entities`
    async fn entities(&self) -> Result<Value, EngineError>;

    /// `GET /variables`
    async fn variables(&self) -> Result<Value, EngineError>;

    /// `GET /variable/{name}`
    async fn variable(&self, name: &str) -> Result<Value, EngineError>;

    /// `GET /parameters`
    async fn parameters(&self) -> Result<Value, EngineError>;

    /// `GET /parameter/{id}`
    async fn parameter(&self, id: &str) -> Result<Value, EngineError>;

    /// `POST /calculate`
    async fn calculate(&self, situation: &Situation) -> Result<Value, EngineError>;

    /// `POST /trace`
    async fn trace(&self, situation: &Situation) -> Result<Value, EngineError>;
}
