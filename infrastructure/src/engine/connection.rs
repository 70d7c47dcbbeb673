//! Caller-owned connection to the rule engine.
//!
//! The process entry point builds one [`EngineConnection`] and hands it to
//! every component that talks to the engine. The underlying HTTP client is
//! created on first use and dropped by [`EngineConnection::close`]; a closed
//! connection reopens transparently on its next use.

use fisca_application::EngineError;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Default engine address when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Lazily opened HTTP connection to one engine.
#[derive(Debug)]
pub struct EngineConnection {
    base_url: String,
    timeout: Duration,
    client: Mutex<Option<reqwest::Client>>,
}

impl EngineConnection {
    /// Trailing slashes on `base_url` are dropped.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout,
            client: Mutex::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL of an engine path such as `variable/salary`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The HTTP client, built on first use.
    ///
    /// `reqwest::Client` is reference-counted, so the returned handle shares
    /// the connection pool.
    pub fn client(&self) -> Result<reqwest::Client, EngineError> {
        let mut guard = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EngineError::Client(e.to_string()))?;
        debug!(url = %self.base_url, timeout = ?self.timeout, "Opened engine connection");
        *guard = Some(client.clone());
        Ok(client)
    }

    pub fn is_open(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Release the HTTP client. Closing twice is a no-op.
    pub fn close(&self) {
        let mut guard = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            debug!(url = %self.base_url, "Closed engine connection");
        }
    }
}

impl Default for EngineConnection {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_open() {
        let connection = EngineConnection::default();
        assert!(!connection.is_open());

        connection.client().unwrap();
        assert!(connection.is_open());
    }

    #[test]
    fn test_close_is_idempotent_and_reopens() {
        let connection = EngineConnection::default();
        connection.close();
        connection.client().unwrap();
        connection.close();
        connection.close();
        assert!(!connection.is_open());

        connection.client().unwrap();
        assert!(connection.is_open());
    }

    #[test]
    fn test_url_building() {
        let connection = EngineConnection::new("http://engine:5000/", DEFAULT_TIMEOUT);
        assert_eq!(connection.base_url(), "http://engine:5000");
        assert_eq!(connection.url("entities"), "http://engine:5000/entities");
        assert_eq!(
            connection.url("/parameter/taxes.income_tax.rate"),
            "http://engine:5000/parameter/taxes.income_tax.rate"
        );
    }
}
