//! Validate Situation use case.
//!
//! Fetches the entity and variable schema, then runs the pure
//! [`SituationValidator`]. Structural problems are reported in the payload;
//! only failures to fetch or read the schema are errors.

use crate::ports::rule_engine::{EngineError, RuleEngine};
use fisca_domain::{EntityCatalog, Situation, SituationValidator, VariableCatalog};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for `validate_situation`.
#[derive(Clone)]
pub struct ValidateSituationUseCase {
    engine: Arc<dyn RuleEngine>,
}

impl ValidateSituationUseCase {
    pub fn new(engine: Arc<dyn RuleEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self, situation: &Value) -> Result<Value, EngineError> {
        let situation = Situation::from_argument(situation)?;

        let entities = EntityCatalog::from_json(&self.engine.entities().await?)?;
        let variables = VariableCatalog::from_json(&self.engine.variables().await?)?;
        debug!(
            entities = entities.len(),
            variables = variables.len(),
            "Schema loaded for validation"
        );

        let report = SituationValidator::new(&entities, &variables).validate(&situation);
        info!(
            valid = report.is_valid(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Situation validated"
        );

        Ok(report.to_json())
    }
}
