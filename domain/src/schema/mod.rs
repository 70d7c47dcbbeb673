//! Rule-system schema as published by the engine.
//!
//! - [`entity`]: entity types, group roles
//! - [`variable`]: variable listing, details, definition periods

pub mod entity;
pub mod variable;

pub use entity::{EntityCatalog, EntityDefinition, RoleDescriptor};
pub use variable::{DefinitionPeriod, ValueType, VariableCatalog, VariableDetail, VariableSummary};
