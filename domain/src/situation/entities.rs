//! The situation payload: entity collections, instances and variable values.

use crate::core::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Suggestion attached to an empty situation.
pub const SITUATION_SUGGESTION: &str = "Provide a situation object with persons and households";

/// A situation as submitted by the caller.
///
/// ```json
/// {
///   "persons":    {"alice": {"salary": {"2024-01": 3000}}},
///   "households": {"h1": {"adults": ["alice"], "rent": {"2024-01": null}}}
/// }
/// ```
///
/// Top-level keys are entity plurals, each mapping instance ids to instance
/// objects. A `null` value requests computation of that variable/period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Situation(Map<String, Value>);

impl Situation {
    /// Accept a tool argument as a situation.
    ///
    /// Fails with a validation error unless the value is a non-empty object.
    pub fn from_argument(value: &Value) -> Result<Self, ToolError> {
        match value {
            Value::Object(entries) if !entries.is_empty() => Ok(Self(entries.clone())),
            Value::Object(_) | Value::Null => Err(ToolError::validation("Situation is required")
                .with_suggestions([SITUATION_SUGGESTION])),
            _ => Err(ToolError::validation("Situation must be a JSON object")
                .with_suggestions([SITUATION_SUGGESTION])),
        }
    }

    /// Top-level keys in submission order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Raw value of an entity collection.
    pub fn collection(&self, plural: &str) -> Option<&Value> {
        self.0.get(plural)
    }

    /// Instances of an entity collection, in submission order.
    ///
    /// Yields nothing when the collection is absent or not an object.
    pub fn instances<'a>(
        &'a self,
        plural: &str,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> + use<'a> {
        self.0
            .get(plural)
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|instances| instances.iter())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}
