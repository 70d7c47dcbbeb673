//! Tool dispatcher.
//!
//! Single entry point for tool invocations. Every call ends in exactly one
//! [`ToolOutput`]:
//!
//! - unknown tool name → `validation_error` "Unknown tool: '<name>'"
//! - missing or mistyped argument → `validation_error`
//! - taxonomy error from a handler → that error, unchanged
//! - any other failure, panics included → `internal_error` (500)

use crate::catalog::{
    CALCULATE, DESCRIBE_VARIABLE, GET_PARAMETER, LIST_ENTITIES, LIST_PARAMETERS, LIST_VARIABLES,
    SEARCH_VARIABLES, TRACE_CALCULATION, VALIDATE_SITUATION, default_tool_spec,
};
use crate::config::BehaviorConfig;
use crate::ports::rule_engine::{EngineError, RuleEngine};
use crate::use_cases::calculate::CalculateUseCase;
use crate::use_cases::explore::ExploreUseCase;
use crate::use_cases::validate_situation::ValidateSituationUseCase;
use fisca_domain::{DefaultToolValidator, ToolCall, ToolError, ToolOutput, ToolSpec, ToolValidator};
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes tool calls to their handlers and renders the outcome.
#[derive(Clone)]
pub struct ToolDispatcher {
    spec: ToolSpec,
    validator: DefaultToolValidator,
    explore: ExploreUseCase,
    calculate: CalculateUseCase,
    validate: ValidateSituationUseCase,
}

impl ToolDispatcher {
    pub fn new(engine: Arc<dyn RuleEngine>) -> Self {
        Self {
            spec: default_tool_spec(),
            validator: DefaultToolValidator,
            explore: ExploreUseCase::new(engine.clone()),
            calculate: CalculateUseCase::new(engine.clone()),
            validate: ValidateSituationUseCase::new(engine),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.explore = self.explore.with_config(config);
        self
    }

    pub fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Run one tool call to completion.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolOutput {
        let tool = call.tool_name.as_str();
        debug!(tool = %tool, "Dispatching tool call");

        let outcome = AssertUnwindSafe(self.route(call)).catch_unwind().await;

        match outcome {
            Ok(Ok(value)) => {
                debug!(tool = %tool, "Tool call succeeded");
                ToolOutput::Success(value)
            }
            Ok(Err(err)) => {
                let taxonomy = err.is_taxonomy();
                let err = err.into_tool_error();
                warn!(
                    tool = %tool,
                    kind = %err.kind,
                    code = err.code,
                    taxonomy,
                    "Tool call failed: {}",
                    err.message
                );
                ToolOutput::Failure(err)
            }
            Err(panic) => {
                let message = panic_message(&*panic);
                warn!(tool = %tool, "Tool handler panicked: {}", message);
                ToolOutput::Failure(ToolError::internal(message))
            }
        }
    }

    async fn route(&self, call: &ToolCall) -> Result<Value, EngineError> {
        let definition = self.spec.get(&call.tool_name).ok_or_else(|| {
            ToolError::validation(format!("Unknown tool: '{}'", call.tool_name))
        })?;
        self.validator.validate(call, definition)?;

        match definition.name.as_str() {
            LIST_ENTITIES => self.explore.list_entities().await,
            LIST_VARIABLES => self.explore.list_variables(call.get_string("entity")).await,
            DESCRIBE_VARIABLE => {
                let name = required_string(call, "variable_name")?;
                self.explore.describe_variable(name).await
            }
            LIST_PARAMETERS => self.explore.list_parameters().await,
            GET_PARAMETER => {
                let id = required_string(call, "parameter_id")?;
                self.explore.get_parameter(id).await
            }
            SEARCH_VARIABLES => {
                let query = required_string(call, "query")?;
                self.explore
                    .search_variables(query, call.get_string("entity"))
                    .await
            }
            CALCULATE => self.calculate.calculate(situation_argument(call)).await,
            TRACE_CALCULATION => self.calculate.trace(situation_argument(call)).await,
            VALIDATE_SITUATION => self.validate.execute(situation_argument(call)).await,
            other => Err(ToolError::internal(format!("No handler for tool '{}'", other)).into()),
        }
    }
}

fn required_string<'a>(call: &'a ToolCall, key: &str) -> Result<&'a str, ToolError> {
    call.require_string(key).map_err(ToolError::validation)
}

static NULL: Value = Value::Null;

fn situation_argument(call: &ToolCall) -> &Value {
    call.get("situation").unwrap_or(&NULL)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Tool handler panicked".to_string()
    }
}
