//! Calculation use case.
//!
//! Submits a situation to the engine as-is. Only emptiness is checked here;
//! structural checks belong to `validate_situation`, period formats to the
//! engine.

use crate::ports::rule_engine::{EngineError, RuleEngine};
use fisca_domain::Situation;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Use case for `calculate` and `trace_calculation`.
#[derive(Clone)]
pub struct CalculateUseCase {
    engine: Arc<dyn RuleEngine>,
}

impl CalculateUseCase {
    pub fn new(engine: Arc<dyn RuleEngine>) -> Self {
        Self { engine }
    }

    /// Compute the requested (null) values of a situation.
    pub async fn calculate(&self, situation: &Value) -> Result<Value, EngineError> {
        let situation = Situation::from_argument(situation)?;
        debug!(entities = situation.as_map().len(), "Submitting calculation");
        self.engine.calculate(&situation).await
    }

    /// Like [`calculate`](Self::calculate), with the dependency trace.
    pub async fn trace(&self, situation: &Value) -> Result<Value, EngineError> {
        let situation = Situation::from_argument(situation)?;
        debug!(entities = situation.as_map().len(), "Submitting traced calculation");
        self.engine.trace(&situation).await
    }
}
