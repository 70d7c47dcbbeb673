//! Schema exploration use case.
//!
//! Read-only tools over the engine's published schema: entities, variables
//! and parameters. Most are straight pass-throughs; entity filtering needs one
//! detail fetch per candidate variable and follows the configured
//! [`FetchPolicy`].

use crate::config::BehaviorConfig;
use crate::ports::rule_engine::{EngineError, RuleEngine};
use fisca_domain::{FetchPolicy, ToolError, VariableCatalog, VariableDetail};
use futures::StreamExt;
use futures::stream;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::debug;

/// Maximum number of variable detail fetches in flight.
const DETAIL_FETCH_CONCURRENCY: usize = 8;

/// Use case for exploring entities, variables and parameters.
#[derive(Clone)]
pub struct ExploreUseCase {
    engine: Arc<dyn RuleEngine>,
    fetch_policy: FetchPolicy,
}

impl ExploreUseCase {
    pub fn new(engine: Arc<dyn RuleEngine>) -> Self {
        Self {
            engine,
            fetch_policy: FetchPolicy::default(),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.fetch_policy = config.fetch_policy;
        self
    }

    pub async fn list_entities(&self) -> Result<Value, EngineError> {
        self.engine.entities().await
    }

    /// All variables, or only those whose detail names `entity` as owner.
    pub async fn list_variables(&self, entity: Option<&str>) -> Result<Value, EngineError> {
        let variables = self.engine.variables().await?;
        let Some(entity) = entity else {
            return Ok(variables);
        };

        let candidates = variables_object(variables)?;
        let filtered = self.filter_by_entity(candidates, entity).await?;
        Ok(Value::Object(filtered))
    }

    pub async fn describe_variable(&self, name: &str) -> Result<Value, EngineError> {
        self.engine.variable(name).await
    }

    pub async fn list_parameters(&self) -> Result<Value, EngineError> {
        self.engine.parameters().await
    }

    pub async fn get_parameter(&self, id: &str) -> Result<Value, EngineError> {
        self.engine.parameter(id).await
    }

    /// Case-insensitive search over names and descriptions.
    ///
    /// With no match, returns a message with suggestions instead of an empty
    /// object.
    pub async fn search_variables(
        &self,
        query: &str,
        entity: Option<&str>,
    ) -> Result<Value, EngineError> {
        let variables = self.engine.variables().await?;
        let catalog = VariableCatalog::from_json(&variables)?;
        let query_lower = query.to_lowercase();

        let candidates: Map<String, Value> = variables_object(variables)?
            .into_iter()
            .filter(|(name, _)| {
                catalog
                    .get(name)
                    .is_some_and(|summary| summary.matches(name, &query_lower))
            })
            .collect();

        let matches = match entity {
            Some(entity) => self.filter_by_entity(candidates, entity).await?,
            None => candidates,
        };

        debug!(query, matches = matches.len(), "Variable search complete");

        if matches.is_empty() {
            return Ok(json!({
                "message": format!("No variables found matching '{}'", query),
                "suggestions": [
                    "Try a different search term",
                    "Use list_variables to see all available variables",
                ],
            }));
        }

        Ok(Value::Object(matches))
    }

    /// Keep the candidates whose variable detail belongs to `entity`.
    ///
    /// Details are fetched concurrently but results keep the engine's order.
    /// A failed fetch, or a detail that does not parse, drops the candidate
    /// under [`FetchPolicy::SkipOnError`] and aborts the whole filter under
    /// [`FetchPolicy::FailFast`].
    async fn filter_by_entity(
        &self,
        candidates: Map<String, Value>,
        entity: &str,
    ) -> Result<Map<String, Value>, EngineError> {
        let engine = &self.engine;
        let mut details = std::pin::pin!(
            stream::iter(candidates)
                .map(|(name, summary)| async move {
                    let detail = engine.variable(&name).await;
                    (name, summary, detail)
                })
                .buffered(DETAIL_FETCH_CONCURRENCY)
        );

        let mut filtered = Map::new();
        while let Some((name, summary, detail)) = details.next().await {
            let detail = detail
                .and_then(|value| VariableDetail::from_json(&value).map_err(EngineError::from));
            match detail {
                Ok(detail) => {
                    if detail.entity == entity {
                        filtered.insert(name, summary);
                    }
                }
                Err(err) => match self.fetch_policy {
                    FetchPolicy::SkipOnError => {
                        debug!(
                            variable = %name,
                            error = %err,
                            "Skipping variable with unavailable detail"
                        );
                    }
                    FetchPolicy::FailFast => return Err(err),
                },
            }
        }

        Ok(filtered)
    }
}

fn variables_object(variables: Value) -> Result<Map<String, Value>, EngineError> {
    match variables {
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::internal("Unexpected variables payload: not an object").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockEngine;
    use fisca_domain::ErrorKind;

    fn use_case(engine: MockEngine) -> (ExploreUseCase, Arc<MockEngine>) {
        let engine = Arc::new(engine);
        (ExploreUseCase::new(engine.clone()), engine)
    }

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[tokio::test]
    async fn test_list_variables_unfiltered_is_pass_through() {
        let (explore, engine) = use_case(MockEngine::new());
        let result = explore.list_variables(None).await.unwrap();

        assert_eq!(keys(&result), vec!["salary", "age", "income_tax", "rent"]);
        assert_eq!(engine.calls(), vec!["variables"]);
    }

    #[tokio::test]
    async fn test_list_variables_by_entity() {
        let (explore, _) = use_case(MockEngine::new());

        let persons = explore.list_variables(Some("person")).await.unwrap();
        assert_eq!(keys(&persons), vec!["salary", "age", "income_tax"]);
        assert_eq!(persons["salary"]["description"], "Gross salary");

        let households = explore.list_variables(Some("household")).await.unwrap();
        assert_eq!(keys(&households), vec!["rent"]);
    }

    #[tokio::test]
    async fn test_list_variables_skips_failed_details() {
        let engine = MockEngine::new()
            .with_failing_detail("age", ToolError::validation("Variable is broken"));
        let (explore, _) = use_case(engine);

        let result = explore.list_variables(Some("person")).await.unwrap();
        assert_eq!(keys(&result), vec!["salary", "income_tax"]);
    }

    #[tokio::test]
    async fn test_list_variables_fail_fast() {
        let engine = MockEngine::new()
            .with_failing_detail("age", ToolError::validation("Variable is broken"));
        let (explore, _) = use_case(engine);
        let explore =
            explore.with_config(BehaviorConfig::with_fetch_policy(FetchPolicy::FailFast));

        let err = explore
            .list_variables(Some("person"))
            .await
            .unwrap_err()
            .into_tool_error();
        assert_eq!(err.message, "Variable is broken");
    }

    #[tokio::test]
    async fn test_malformed_detail_follows_fetch_policy() {
        let engine = MockEngine::new().with_detail("age", json!({"id": "age"}));
        let (explore, _) = use_case(engine);

        let result = explore.list_variables(Some("person")).await.unwrap();
        assert_eq!(keys(&result), vec!["salary", "income_tax"]);

        let explore =
            explore.with_config(BehaviorConfig::with_fetch_policy(FetchPolicy::FailFast));
        let err = explore
            .list_variables(Some("person"))
            .await
            .unwrap_err()
            .into_tool_error();
        assert!(err.is_kind(ErrorKind::Internal));
        assert!(err.message.starts_with("Unexpected variable payload"));
    }

    #[tokio::test]
    async fn test_search_by_name_and_description() {
        let (explore, engine) = use_case(MockEngine::new());

        let result = explore.search_variables("TAX", None).await.unwrap();
        assert_eq!(keys(&result), vec!["income_tax"]);

        let result = explore.search_variables("household", None).await.unwrap();
        assert_eq!(keys(&result), vec!["rent"]);

        // No detail fetches without an entity filter
        assert!(engine.calls().iter().all(|c| c == "variables"));
    }

    #[tokio::test]
    async fn test_search_with_entity_filter() {
        let (explore, engine) = use_case(MockEngine::new());

        let result = explore.search_variables("a", Some("household")).await.unwrap();
        assert_eq!(keys(&result), vec!["rent"]);
        // Every candidate matched "a", so every detail was fetched
        assert_eq!(engine.calls().len(), 5);
        assert!(engine.calls().contains(&"variable/salary".to_string()));
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let (explore, _) = use_case(MockEngine::new());

        let result = explore.search_variables("pension", None).await.unwrap();
        assert_eq!(result["message"], "No variables found matching 'pension'");
        assert_eq!(
            result["suggestions"],
            json!([
                "Try a different search term",
                "Use list_variables to see all available variables"
            ])
        );
    }

    #[tokio::test]
    async fn test_search_skipped_candidates_lead_to_no_match() {
        let engine = MockEngine::new()
            .with_failing_detail("rent", ToolError::internal("boom"));
        let (explore, _) = use_case(engine);

        let result = explore.search_variables("rent", Some("household")).await.unwrap();
        assert_eq!(result["message"], "No variables found matching 'rent'");
    }

    #[tokio::test]
    async fn test_pass_through_endpoints() {
        let (explore, engine) = use_case(MockEngine::new());

        assert!(explore.list_entities().await.unwrap()["household"]["roles"].is_object());
        assert_eq!(
            explore.describe_variable("salary").await.unwrap()["definitionPeriod"],
            "MONTH"
        );
        assert!(explore.list_parameters().await.unwrap().is_object());
        assert_eq!(
            explore.get_parameter("taxes.income_tax_rate").await.unwrap()["values"]["2020-01-01"],
            0.15
        );
        assert_eq!(
            engine.calls(),
            vec![
                "entities",
                "variable/salary",
                "parameters",
                "parameter/taxes.income_tax_rate"
            ]
        );
    }

    #[tokio::test]
    async fn test_not_found_propagates_unchanged() {
        let (explore, _) = use_case(MockEngine::new());

        let err = explore
            .describe_variable("nope")
            .await
            .unwrap_err()
            .into_tool_error();
        assert!(err.is_kind(ErrorKind::NotFound));
        assert_eq!(err.message, "Variable 'nope' not found");
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let engine = MockEngine::new().failing(ToolError::connection(
            "Cannot connect to OpenFisca API at http://localhost:5000",
        ));
        let (explore, _) = use_case(engine);

        let err = explore
            .list_variables(Some("person"))
            .await
            .unwrap_err()
            .into_tool_error();
        assert!(err.is_kind(ErrorKind::Connection));
    }
}
