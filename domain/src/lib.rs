//! Domain layer for openfisca-tools
//!
//! This crate contains the pure model behind the tool layer: the error
//! taxonomy shared by every tool, the rule-system schema published by the
//! engine, situations and their validation, and the tool surface itself.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Error taxonomy
//!
//! Every failure reaching a caller is a [`ToolError`] with one of five
//! [`ErrorKind`]s and a fixed JSON envelope. Engine error bodies are mapped
//! into it by [`normalize_api_error`].
//!
//! ## Situation validation
//!
//! [`SituationValidator`] checks a [`Situation`] against the engine's
//! [`EntityCatalog`] and [`VariableCatalog`] without calling the engine.

pub mod core;
pub mod schema;
pub mod situation;
pub mod tool;

pub use core::{
    error::{CONNECTION_SUGGESTION, ErrorKind, ToolError},
    upstream::normalize_api_error,
};
pub use schema::{
    DefinitionPeriod, EntityCatalog, EntityDefinition, RoleDescriptor, ValueType, VariableCatalog,
    VariableDetail, VariableSummary,
};
pub use situation::{Situation, SituationValidator, ValidationReport};
pub use tool::{
    DefaultToolValidator, FetchPolicy, ParamType, ToolCall, ToolDefinition, ToolOutput,
    ToolParameter, ToolSpec, ToolValidator,
};
