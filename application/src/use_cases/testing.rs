//! In-memory rule engine shared by the use case tests.

use crate::ports::rule_engine::{EngineError, RuleEngine};
use async_trait::async_trait;
use fisca_domain::{Situation, ToolError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted engine: fixed payloads per endpoint, call log, optional panic.
pub(crate) struct MockEngine {
    entities: Value,
    variables: Value,
    details: HashMap<String, Result<Value, ToolError>>,
    parameters: Value,
    parameter_values: HashMap<String, Value>,
    failure: Option<ToolError>,
    panic_on_calculate: bool,
    calls: Mutex<Vec<String>>,
}

impl MockEngine {
    /// Person + household (adult/child roles) with `salary`, `age`, `income_tax`, `rent`.
    pub(crate) fn new() -> Self {
        Self {
            entities: json!({
                "person": {"plural": "persons", "description": "An individual"},
                "household": {
                    "plural": "households",
                    "description": "A household",
                    "roles": {
                        "adult": {"key": "adult", "plural": "adults", "max": 2},
                        "child": {"key": "child", "plural": "children"}
                    }
                }
            }),
            variables: json!({
                "salary": {"description": "Gross salary"},
                "age": {"description": "Age in years"},
                "income_tax": {"description": "Income tax"},
                "rent": {"description": "Monthly rent paid by the household"}
            }),
            details: HashMap::from([
                ("salary".to_string(), Ok(detail("salary", "person", "MONTH"))),
                ("age".to_string(), Ok(detail("age", "person", "MONTH"))),
                ("income_tax".to_string(), Ok(detail("income_tax", "person", "YEAR"))),
                ("rent".to_string(), Ok(detail("rent", "household", "MONTH"))),
            ]),
            parameters: json!({
                "taxes.income_tax_rate": {"description": "Income tax rate"}
            }),
            parameter_values: HashMap::from([(
                "taxes.income_tax_rate".to_string(),
                json!({"id": "taxes.income_tax_rate", "values": {"2020-01-01": 0.15}}),
            )]),
            failure: None,
            panic_on_calculate: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replace the detail payload of one variable.
    pub(crate) fn with_detail(mut self, name: &str, detail: Value) -> Self {
        self.details.insert(name.to_string(), Ok(detail));
        self
    }

    /// Make the detail fetch of one variable fail.
    pub(crate) fn with_failing_detail(mut self, name: &str, error: ToolError) -> Self {
        self.details.insert(name.to_string(), Err(error));
        self
    }

    /// Make every endpoint fail with the same error.
    pub(crate) fn failing(mut self, error: ToolError) -> Self {
        self.failure = Some(error);
        self
    }

    pub(crate) fn panicking_on_calculate(mut self) -> Self {
        self.panic_on_calculate = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(call.into());
        match &self.failure {
            Some(err) => Err(err.clone().into()),
            None => Ok(()),
        }
    }
}

fn detail(id: &str, entity: &str, period: &str) -> Value {
    json!({
        "id": id,
        "valueType": "Float",
        "definitionPeriod": period,
        "entity": entity,
        "description": id,
        "formulas": {},
        "references": []
    })
}

#[async_trait]
impl RuleEngine for MockEngine {
    async fn entities(&self) -> Result<Value, EngineError> {
        self.record("entities")?;
        Ok(self.entities.clone())
    }

    async fn variables(&self) -> Result<Value, EngineError> {
        self.record("variables")?;
        Ok(self.variables.clone())
    }

    async fn variable(&self, name: &str) -> Result<Value, EngineError> {
        self.record(format!("variable/{}", name))?;
        match self.details.get(name) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(err)) => Err(err.clone().into()),
            None => Err(ToolError::not_found(format!("Variable '{}' not found", name)).into()),
        }
    }

    async fn parameters(&self) -> Result<Value, EngineError> {
        self.record("parameters")?;
        Ok(self.parameters.clone())
    }

    async fn parameter(&self, id: &str) -> Result<Value, EngineError> {
        self.record(format!("parameter/{}", id))?;
        self.parameter_values.get(id).cloned().ok_or_else(|| {
            ToolError::not_found(format!("Parameter '{}' not found", id)).into()
        })
    }

    async fn calculate(&self, situation: &Situation) -> Result<Value, EngineError> {
        self.record("calculate")?;
        if self.panic_on_calculate {
            panic!("engine exploded");
        }
        Ok(situation.to_value())
    }

    async fn trace(&self, situation: &Situation) -> Result<Value, EngineError> {
        self.record("trace")?;
        Ok(json!({
            "requestedCalculations": [],
            "trace": {},
            "entitiesDescription": situation.keys().collect::<Vec<_>>(),
        }))
    }
}
