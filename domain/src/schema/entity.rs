//! Entity definitions published by the rule engine (`GET /entities`).
//!
//! Entities without roles are *individual* entities (a person); entities with
//! roles are *group* entities (a household) aggregating individual instances.

use crate::core::error::ToolError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Plural key assumed for individual instances when the catalog has none.
pub const DEFAULT_INDIVIDUAL_PLURAL: &str = "persons";

/// A role inside a group entity.
///
/// The engine normally describes roles as objects (`{"plural": "adults",
/// "max": 2}`), but nothing guarantees it; anything that is not an object
/// carrying a `plural` or `key` field is kept as [`RoleDescriptor::Simple`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum RoleDescriptor {
    Simple {
        key: String,
    },
    Detailed {
        key: String,
        plural: String,
        max: Option<u32>,
        description: Option<String>,
    },
}

impl RoleDescriptor {
    /// Build a descriptor from the role key and its raw engine value.
    pub fn from_json(key: &str, value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Simple {
                key: key.to_string(),
            };
        };

        let plural = object
            .get("plural")
            .or_else(|| object.get("key"))
            .and_then(Value::as_str);

        match plural {
            Some(plural) => Self::Detailed {
                key: key.to_string(),
                plural: plural.to_string(),
                max: object
                    .get("max")
                    .and_then(Value::as_u64)
                    .and_then(|max| u32::try_from(max).ok()),
                description: object
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            None => Self::Simple {
                key: key.to_string(),
            },
        }
    }

    pub fn key(&self) -> &str {
        match self {
            RoleDescriptor::Simple { key } | RoleDescriptor::Detailed { key, .. } => key,
        }
    }

    pub fn plural(&self) -> Option<&str> {
        match self {
            RoleDescriptor::Simple { .. } => None,
            RoleDescriptor::Detailed { plural, .. } => Some(plural),
        }
    }
}

/// Definition of one entity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDefinition {
    pub key: String,
    pub plural: String,
    pub description: Option<String>,
    pub documentation: Option<String>,
    /// Roles in engine order; `None` for individual entities
    pub roles: Option<IndexMap<String, RoleDescriptor>>,
}

impl EntityDefinition {
    pub fn individual(key: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            plural: plural.into(),
            description: None,
            documentation: None,
            roles: None,
        }
    }

    pub fn group(
        key: impl Into<String>,
        plural: impl Into<String>,
        roles: impl IntoIterator<Item = RoleDescriptor>,
    ) -> Self {
        Self {
            key: key.into(),
            plural: plural.into(),
            description: None,
            documentation: None,
            roles: Some(
                roles
                    .into_iter()
                    .map(|role| (role.key().to_string(), role))
                    .collect(),
            ),
        }
    }

    pub fn is_group(&self) -> bool {
        self.roles.is_some()
    }

    /// Role keys (e.g. `adult`, `child`).
    pub fn role_keys(&self) -> HashSet<&str> {
        self.roles
            .iter()
            .flat_map(|roles| roles.keys().map(String::as_str))
            .collect()
    }

    /// Role plural forms (e.g. `adults`, `children`).
    ///
    /// Returns `None` unless every role is [`RoleDescriptor::Detailed`]; with
    /// mixed descriptors the plural forms are unreliable and are not used.
    pub fn role_plurals(&self) -> Option<HashSet<&str>> {
        let roles = self.roles.as_ref()?;
        roles.values().map(RoleDescriptor::plural).collect()
    }
}

#[derive(Deserialize)]
struct RawEntity {
    plural: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    roles: Option<IndexMap<String, Value>>,
}

/// All entity types of a rule system, in engine order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityCatalog {
    entities: IndexMap<String, EntityDefinition>,
}

impl EntityCatalog {
    pub fn new(entities: impl IntoIterator<Item = EntityDefinition>) -> Self {
        Self {
            entities: entities
                .into_iter()
                .map(|entity| (entity.key.clone(), entity))
                .collect(),
        }
    }

    /// Parse the `GET /entities` payload.
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let raw: IndexMap<String, RawEntity> = serde_json::from_value(value.clone())
            .map_err(|e| ToolError::internal(format!("Unexpected entities payload: {}", e)))?;

        let mut entities = IndexMap::with_capacity(raw.len());
        for (key, entity) in raw {
            let plural = entity.plural.ok_or_else(|| {
                ToolError::internal(format!("Entity '{}' has no plural form", key))
            })?;
            let roles = entity.roles.map(|roles| {
                roles
                    .iter()
                    .map(|(role_key, role)| {
                        (role_key.clone(), RoleDescriptor::from_json(role_key, role))
                    })
                    .collect()
            });
            entities.insert(
                key.clone(),
                EntityDefinition {
                    key,
                    plural,
                    description: entity.description,
                    documentation: entity.documentation,
                    roles,
                },
            );
        }

        Ok(Self { entities })
    }

    pub fn get(&self, key: &str) -> Option<&EntityDefinition> {
        self.entities.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.entities.values()
    }

    pub fn groups(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.iter().filter(|entity| entity.is_group())
    }

    pub fn individuals(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.iter().filter(|entity| !entity.is_group())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Keys accepted at the top level of a situation: every plural form plus
    /// every entity key (singular usage is tolerated).
    pub fn valid_top_level_keys(&self) -> HashSet<&str> {
        self.entities
            .iter()
            .flat_map(|(key, entity)| [key.as_str(), entity.plural.as_str()])
            .collect()
    }

    /// Plural key under which individual instances live (`persons`).
    pub fn individual_plural(&self) -> &str {
        self.individuals()
            .next()
            .map(|entity| entity.plural.as_str())
            .unwrap_or(DEFAULT_INDIVIDUAL_PLURAL)
    }
}
