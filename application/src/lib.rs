//! Application layer for openfisca-tools
//!
//! This crate contains the tool catalog, the tool handlers (use cases), the
//! dispatcher and the port definitions they run against.
//! It depends only on the domain layer.

pub mod catalog;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use catalog::default_tool_spec;
pub use config::BehaviorConfig;
pub use ports::{
    rule_engine::{EngineError, RuleEngine},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::{
    calculate::CalculateUseCase, dispatch::ToolDispatcher, explore::ExploreUseCase,
    validate_situation::ValidateSituationUseCase,
};
