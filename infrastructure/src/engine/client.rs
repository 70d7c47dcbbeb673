//! HTTP adapter for the [`RuleEngine`] port.
//!
//! One request per call, no retries. Failures are interpreted, never masked:
//!
//! - peer unreachable (connect error or timeout) → `connection_error` with
//!   `details.url` and `details.error`
//! - status >= 400 → body run through [`normalize_api_error`]; a non-JSON
//!   body is first wrapped as `{"error": <text>}`
//! - success with a non-JSON body → [`EngineError::Decode`]

use super::connection::EngineConnection;
use async_trait::async_trait;
use fisca_application::{EngineError, RuleEngine};
use fisca_domain::{Situation, ToolError, normalize_api_error};
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Rule engine reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRuleEngine {
    connection: Arc<EngineConnection>,
}

impl HttpRuleEngine {
    pub fn new(connection: Arc<EngineConnection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &EngineConnection {
        &self.connection
    }

    async fn get(&self, path: &str) -> Result<Value, EngineError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, EngineError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, EngineError> {
        let client = self.connection.client()?;
        let url = self.connection.url(path);
        debug!(method = %method, path, "Engine request");

        let mut request = client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        handle_response(path, response).await
    }

    fn request_error(&self, err: reqwest::Error) -> EngineError {
        if !(err.is_connect() || err.is_timeout()) {
            return EngineError::Transport(err.to_string());
        }

        let base_url = self.connection.base_url();
        warn!(url = %base_url, error = %err, "Cannot reach rule engine");

        let mut error = ToolError::connection(format!(
            "Cannot connect to OpenFisca API at {}",
            base_url
        ))
        .with_detail("url", base_url)
        .with_detail("error", err.to_string());
        if err.is_timeout() {
            error = error.with_detail("timeout_seconds", self.connection.timeout().as_secs());
        }
        error.into()
    }
}

async fn handle_response(path: &str, response: reqwest::Response) -> Result<Value, EngineError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| EngineError::Transport(e.to_string()))?;

    if status.is_client_error() || status.is_server_error() {
        debug!(path, status = status.as_u16(), "Engine returned an error");
        let body = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "error": text }));
        return Err(normalize_api_error(&body, status.as_u16()).into());
    }

    serde_json::from_str(&text).map_err(|e| EngineError::Decode(e.to_string()))
}

#[async_trait]
impl RuleEngine for HttpRuleEngine {
    async fn entities(&self) -> Result<Value, EngineError> {
        self.get("entities").await
    }

    async fn variables(&self) -> Result<Value, EngineError> {
        self.get("variables").await
    }

    async fn variable(&self, name: &str) -> Result<Value, EngineError> {
        self.get(&format!("variable/{}", name)).await
    }

    async fn parameters(&self) -> Result<Value, EngineError> {
        self.get("parameters").await
    }

    async fn parameter(&self, id: &str) -> Result<Value, EngineError> {
        self.get(&format!("parameter/{}", id)).await
    }

    async fn calculate(&self, situation: &Situation) -> Result<Value, EngineError> {
        self.post("calculate", &situation.to_value()).await
    }

    async fn trace(&self, situation: &Situation) -> Result<Value, EngineError> {
        self.post("trace", &situation.to_value()).await
    }
}
