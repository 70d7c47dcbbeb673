//! Application-level configuration.
//!
//! Controls how tool handlers behave, independently of where the values
//! were loaded from.

use fisca_domain::FetchPolicy;

/// Tool handler behavior configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Failure handling for per-variable detail fetches.
    pub fetch_policy: FetchPolicy,
}

impl BehaviorConfig {
    pub fn with_fetch_policy(fetch_policy: FetchPolicy) -> Self {
        Self { fetch_policy }
    }
}
