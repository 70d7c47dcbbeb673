//! Rule engine transport.
//!
//! - [`connection`]: caller-owned, lazily opened HTTP connection
//! - [`client`]: [`HttpRuleEngine`], the `RuleEngine` adapter over it

pub mod client;
pub mod connection;

pub use client::HttpRuleEngine;
pub use connection::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, EngineConnection};
