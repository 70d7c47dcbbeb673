//! Infrastructure layer for openfisca-tools
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP rule engine client, the JSON Schema
//! tool converter, and configuration file loading.

pub mod config;
pub mod engine;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEngineConfig, FileToolsConfig,
};
pub use engine::{EngineConnection, HttpRuleEngine};
pub use tools::JsonSchemaToolConverter;
