//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [engine]
//! base_url = "http://localhost:5000"
//! timeout_seconds = 30
//!
//! [tools]
//! fetch_policy = "skip_on_error"   # or "fail_fast"
//! ```

use crate::engine::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, EngineConnection};
use fisca_application::BehaviorConfig;
use fisca_domain::FetchPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("engine.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("engine.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("engine.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Rule engine connection
    pub engine: FileEngineConfig,
    /// Tool behavior
    pub tools: FileToolsConfig,
}

/// Raw `[engine]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Engine base address
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Raw `[tools]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Failure handling for per-variable detail fetches
    pub fetch_policy: FetchPolicy,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.engine.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let base_url = self.engine.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.engine.timeout_seconds)
    }

    /// A fresh, unopened connection to the configured engine.
    pub fn engine_connection(&self) -> EngineConnection {
        EngineConnection::new(self.engine.base_url.trim(), self.timeout())
    }

    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::with_fetch_policy(self.tools.fetch_policy)
    }
}
