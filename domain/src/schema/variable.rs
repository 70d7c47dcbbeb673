//! Variables published by the rule engine.
//!
//! `GET /variables` returns a summary per variable (description, href);
//! `GET /variable/{name}` returns the full [`VariableDetail`].

use crate::core::error::ToolError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary entry of the variable listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableSummary {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl VariableSummary {
    /// Case-insensitive substring match on name or description.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches(&self, name: &str, query_lower: &str) -> bool {
        name.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
    }
}

/// All variable names of a rule system with their summaries, in engine order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableCatalog {
    variables: IndexMap<String, VariableSummary>,
}

impl VariableCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: names
                .into_iter()
                .map(|name| (name.into(), VariableSummary::default()))
                .collect(),
        }
    }

    /// Parse the `GET /variables` payload.
    ///
    /// Entries whose value is not an object still count as known names.
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let object = value
            .as_object()
            .ok_or_else(|| ToolError::internal("Unexpected variables payload: not an object"))?;

        let variables = object
            .iter()
            .map(|(name, summary)| {
                let summary = serde_json::from_value(summary.clone()).unwrap_or_default();
                (name.clone(), summary)
            })
            .collect();

        Ok(Self { variables })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&VariableSummary> {
        self.variables.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariableSummary)> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Value type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Float,
    Int,
    Boolean,
    String,
    Date,
}

/// Time granularity a variable's value is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DefinitionPeriod {
    Month,
    Year,
    Day,
    Week,
    Weekday,
    Eternity,
}

impl DefinitionPeriod {
    /// Every definition period, coarsest first.
    pub const ALL: [DefinitionPeriod; 6] = [
        DefinitionPeriod::Eternity,
        DefinitionPeriod::Year,
        DefinitionPeriod::Month,
        DefinitionPeriod::Week,
        DefinitionPeriod::Weekday,
        DefinitionPeriod::Day,
    ];

    /// Name as published by the engine (`MONTH`, `YEAR`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionPeriod::Month => "MONTH",
            DefinitionPeriod::Year => "YEAR",
            DefinitionPeriod::Day => "DAY",
            DefinitionPeriod::Week => "WEEK",
            DefinitionPeriod::Weekday => "WEEKDAY",
            DefinitionPeriod::Eternity => "ETERNITY",
        }
    }

    /// Lexical format of period keys for this definition period.
    pub fn period_format(&self) -> &'static str {
        match self {
            DefinitionPeriod::Month => "YYYY-MM",
            DefinitionPeriod::Year => "YYYY",
            DefinitionPeriod::Day => "YYYY-MM-DD",
            DefinitionPeriod::Week => "YYYY-Www",
            DefinitionPeriod::Weekday => "YYYY-Www-D",
            DefinitionPeriod::Eternity => "ETERNITY",
        }
    }

    /// Example period key, used in tool descriptions.
    pub fn example(&self) -> &'static str {
        match self {
            DefinitionPeriod::Month => "2024-01",
            DefinitionPeriod::Year => "2024",
            DefinitionPeriod::Day => "2024-01-15",
            DefinitionPeriod::Week => "2024-W03",
            DefinitionPeriod::Weekday => "2024-W03-1",
            DefinitionPeriod::Eternity => "ETERNITY",
        }
    }
}

impl std::fmt::Display for DefinitionPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated formula of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Full description of a variable (`GET /variable/{name}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDetail {
    pub id: String,
    pub value_type: ValueType,
    pub definition_period: DefinitionPeriod,
    pub entity: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Formulas keyed by start date, in engine order
    #[serde(default)]
    pub formulas: IndexMap<String, Option<Formula>>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub possible_values: Option<Value>,
    #[serde(default)]
    pub source: Option<String>,
}

impl VariableDetail {
    /// Parse a `GET /variable/{name}` payload; unknown fields are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        serde_json::from_value(value.clone())
            .map_err(|e| ToolError::internal(format!("Unexpected variable payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_from_json() {
        let catalog = VariableCatalog::from_json(&json!({
            "salary": {"description": "Salary", "href": "http://localhost:5000/variable/salary"},
            "age": {"description": "Person's age"},
            "odd": 42,
        }))
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("salary"));
        assert!(catalog.contains("odd"));
        assert!(!catalog.contains("income_tax"));
        assert_eq!(catalog.get("age").unwrap().description, "Person's age");
        assert_eq!(catalog.get("odd").unwrap(), &VariableSummary::default());
    }

    #[test]
    fn test_catalog_rejects_non_object() {
        assert!(VariableCatalog::from_json(&json!(["salary"])).is_err());
    }

    #[test]
    fn test_summary_matches() {
        let summary = VariableSummary {
            description: "Income tax due".to_string(),
            href: None,
        };
        assert!(summary.matches("income_tax", "tax"));
        assert!(summary.matches("something", "income"));
        assert!(summary.matches("Basic_Income", "basic"));
        assert!(!summary.matches("salary", "pension"));
    }

    #[test]
    fn test_definition_period_names_match_wire_format() {
        for period in DefinitionPeriod::ALL {
            let wire = serde_json::to_value(period).unwrap();
            assert_eq!(wire, period.as_str());
            assert_eq!(period.to_string(), period.as_str());
        }
    }

    #[test]
    fn test_examples_follow_their_format() {
        for period in DefinitionPeriod::ALL {
            assert_eq!(
                period.example().len(),
                period.period_format().len(),
                "{}",
                period
            );
        }
    }

    #[test]
    fn test_detail_from_json() {
        let detail = VariableDetail::from_json(&json!({
            "id": "income_tax",
            "valueType": "Float",
            "definitionPeriod": "MONTH",
            "entity": "person",
            "description": "Income tax",
            "formulas": {
                "0001-01-01": {
                    "content": "def formula(person, period, parameters): ...",
                    "source": "https://example.org"
                }
            },
            "references": ["https://law.example.org/income-tax"],
            "defaultValue": 0,
            "unknownField": true,
        }))
        .unwrap();

        assert_eq!(detail.value_type, ValueType::Float);
        assert_eq!(detail.definition_period, DefinitionPeriod::Month);
        assert_eq!(detail.entity, "person");
        assert_eq!(detail.formulas.keys().collect::<Vec<_>>(), vec!["0001-01-01"]);
        assert_eq!(detail.references.len(), 1);
    }

    #[test]
    fn test_detail_requires_entity() {
        let err = VariableDetail::from_json(&json!({
            "id": "salary",
            "valueType": "Float",
            "definitionPeriod": "MONTH",
        }))
        .unwrap_err();
        assert!(err.message.starts_with("Unexpected variable payload"));
    }
}
