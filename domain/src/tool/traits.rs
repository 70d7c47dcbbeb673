//! Tool domain traits
//!
//! Contains pure domain logic traits for tool argument validation.

use super::entities::{ParamType, ToolCall, ToolDefinition};
use crate::core::error::ToolError;
use serde_json::Value;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Checks presence of required parameters and the JSON type of every declared
/// parameter that was supplied. Extra arguments are ignored; agent frameworks
/// routinely attach metadata.
///
/// A `null` string argument counts as missing. A `null` object argument is
/// passed through: the handler decides what an empty object means.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError> {
        for param in &definition.parameters {
            match call.get(&param.name) {
                Some(Value::Null) if param.param_type == ParamType::Object => {}
                None | Some(Value::Null) if param.required => {
                    return Err(ToolError::validation(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    )));
                }
                None | Some(Value::Null) => {}
                Some(value) if !param.param_type.admits(value) => {
                    return Err(ToolError::validation(format!(
                        "Parameter '{}' for tool '{}' must be {}",
                        param.name, definition.name, param.param_type.with_article()
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
