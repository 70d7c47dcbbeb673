//! Structural validation of a situation against the published schema.
//!
//! This never calls the calculation engine. It checks, in order:
//!
//! 1. top-level keys are known entity plurals (or entity keys)
//! 2. at least one individual instance exists
//! 3. every variable on an individual instance is a known variable
//! 4. for every group entity (definition order), every instance key is either
//!    a role assignment referencing existing individuals or a known variable
//!
//! Errors are appended in exactly that order so results are deterministic.
//!
//! Period keys are not checked against definition periods; the engine remains
//! the judge of period formats.

use crate::schema::{EntityCatalog, EntityDefinition, VariableCatalog};
use crate::situation::entities::Situation;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Outcome of validating a situation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Tool payload: `{valid, message, warnings}` or `{valid, errors, warnings}`.
    pub fn to_json(&self) -> Value {
        if self.is_valid() {
            json!({
                "valid": true,
                "message": "Situation is valid",
                "warnings": self.warnings,
            })
        } else {
            json!({
                "valid": false,
                "errors": self.errors,
                "warnings": self.warnings,
            })
        }
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Checks situations against an entity and variable catalog.
#[derive(Debug, Clone, Copy)]
pub struct SituationValidator<'a> {
    entities: &'a EntityCatalog,
    variables: &'a VariableCatalog,
}

impl<'a> SituationValidator<'a> {
    pub fn new(entities: &'a EntityCatalog, variables: &'a VariableCatalog) -> Self {
        Self {
            entities,
            variables,
        }
    }

    pub fn validate(&self, situation: &Situation) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.check_entity_types(situation, &mut report);
        let persons = self.check_persons(situation, &mut report);
        for group in self.entities.groups() {
            self.check_group(group, situation, &persons, &mut report);
        }

        report
    }

    fn check_entity_types(&self, situation: &Situation, report: &mut ValidationReport) {
        let valid_keys = self.entities.valid_top_level_keys();
        for key in situation.keys() {
            if !valid_keys.contains(key.as_str()) {
                report.error(format!("Unknown entity type: '{}'", key));
            }
        }
    }

    /// Checks individual instances and returns their ids.
    fn check_persons<'s>(
        &self,
        situation: &'s Situation,
        report: &mut ValidationReport,
    ) -> HashSet<&'s str> {
        let plural = self.entities.individual_plural();
        check_collection_shape(situation, plural, report);

        let persons: HashSet<&str> = situation
            .instances(plural)
            .map(|(id, _)| id.as_str())
            .collect();
        if persons.is_empty() {
            report.error("At least one person must be defined".to_string());
        }

        for (person_id, person) in situation.instances(plural) {
            let Some(variables) = person.as_object() else {
                report.warning(format!("Expected an object for {} '{}'", plural, person_id));
                continue;
            };
            for name in variables.keys() {
                if !self.variables.contains(name) {
                    report.error(format!(
                        "Unknown variable '{}' for person '{}'",
                        name, person_id
                    ));
                }
            }
        }

        persons
    }

    fn check_group(
        &self,
        group: &EntityDefinition,
        situation: &Situation,
        persons: &HashSet<&str>,
        report: &mut ValidationReport,
    ) {
        let plural = group.plural.as_str();
        check_collection_shape(situation, plural, report);

        let mut instances = situation.instances(plural).peekable();
        if instances.peek().is_none() {
            return;
        }

        let role_keys = group.role_keys();
        let role_plurals = group.role_plurals();
        if role_plurals.is_none() {
            report.warning(format!(
                "Role plural forms unavailable for '{}'; only role keys are recognized",
                group.key
            ));
        }
        let is_role = |key: &str| {
            role_keys.contains(key)
                || role_plurals
                    .as_ref()
                    .is_some_and(|plurals| plurals.contains(key))
        };

        for (instance_id, instance) in instances {
            let Some(entries) = instance.as_object() else {
                report.warning(format!("Expected an object for {} '{}'", plural, instance_id));
                continue;
            };

            for (key, value) in entries {
                if is_role(key.as_str()) {
                    let Some(members) = value.as_array() else {
                        continue;
                    };
                    for member in members {
                        let id = member_id(member);
                        if !persons.contains(id.as_str()) {
                            report.error(format!(
                                "Person '{}' in {}/{}/{} is not defined in {}",
                                id,
                                plural,
                                instance_id,
                                key,
                                self.entities.individual_plural()
                            ));
                        }
                    }
                } else if !self.variables.contains(key) {
                    report.error(format!(
                        "Unknown variable '{}' for {} '{}'",
                        key, plural, instance_id
                    ));
                }
            }
        }
    }
}

/// Warn when an entity collection is present but not an object of instances.
fn check_collection_shape(situation: &Situation, plural: &str, report: &mut ValidationReport) {
    if let Some(collection) = situation.collection(plural)
        && !collection.is_object()
    {
        report.warning(format!(
            "Expected '{}' to map instance ids to instances",
            plural
        ));
    }
}

fn member_id(member: &Value) -> String {
    match member {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RoleDescriptor;
    use serde_json::json;

    fn entities() -> EntityCatalog {
        EntityCatalog::from_json(&json!({
            "person": {"plural": "persons"},
            "household": {
                "plural": "households",
                "roles": {
                    "adult": {"plural": "adults", "max": 2},
                    "child": {"plural": "children"},
                },
            },
        }))
        .unwrap()
    }

    fn variables() -> VariableCatalog {
        VariableCatalog::new(["salary", "age", "income_tax", "rent", "housing_allowance"])
    }

    fn validate(situation: Value) -> ValidationReport {
        let entities = entities();
        let variables = variables();
        let situation = Situation::from_argument(&situation).unwrap();
        SituationValidator::new(&entities, &variables).validate(&situation)
    }

    #[test]
    fn test_valid_situation() {
        let report = validate(json!({
            "persons": {"alice": {"salary": {"2024-01": 3000}}},
            "households": {"h1": {"adults": ["alice"]}},
        }));
        assert!(report.is_valid(), "{:?}", report.errors);
        assert_eq!(
            report.to_json(),
            json!({"valid": true, "message": "Situation is valid", "warnings": []})
        );
    }

    #[test]
    fn test_role_keys_and_group_variables() {
        let report = validate(json!({
            "persons": {"alice": {}, "bob": {}, "carol": {"age": {"2024-01": 4}}},
            "households": {"h1": {
                "adult": ["alice", "bob"],
                "children": ["carol"],
                "rent": {"2024-01": 800},
                "housing_allowance": {"2024-01": null},
            }},
        }));
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[test]
    fn test_missing_persons_and_dangling_reference() {
        let report = validate(json!({
            "persons": {},
            "households": {"h1": {"adults": ["alice"]}},
        }));
        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![
                "At least one person must be defined".to_string(),
                "Person 'alice' in households/h1/adults is not defined in persons".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_persons_key_at_all() {
        let report = validate(json!({"households": {"h1": {}}}));
        assert_eq!(report.errors, vec!["At least one person must be defined".to_string()]);
    }

    #[test]
    fn test_unknown_entity_type() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "companies": {"acme": {}},
        }));
        assert_eq!(report.errors, vec!["Unknown entity type: 'companies'".to_string()]);
    }

    #[test]
    fn test_singular_keys_tolerated() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "household": {"h1": {}},
        }));
        assert!(report.is_valid());
    }

    #[test]
    fn test_unknown_person_variable() {
        let report = validate(json!({
            "persons": {"alice": {"salary": {"2024-01": 1}, "wage": {"2024-01": 1}}},
        }));
        assert_eq!(
            report.errors,
            vec!["Unknown variable 'wage' for person 'alice'".to_string()]
        );
    }

    #[test]
    fn test_unknown_group_key() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "households": {"h1": {"adults": ["alice"], "parents": ["alice"]}},
        }));
        assert_eq!(
            report.errors,
            vec!["Unknown variable 'parents' for households 'h1'".to_string()]
        );
    }

    #[test]
    fn test_one_error_per_dangling_reference() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "households": {
                "h1": {"adults": ["alice", "bob"], "children": ["carol", "dave"]},
                "h2": {"adults": ["erin"]},
            },
        }));
        assert_eq!(
            report.errors,
            vec![
                "Person 'bob' in households/h1/adults is not defined in persons".to_string(),
                "Person 'carol' in households/h1/children is not defined in persons".to_string(),
                "Person 'dave' in households/h1/children is not defined in persons".to_string(),
                "Person 'erin' in households/h2/adults is not defined in persons".to_string(),
            ]
        );
    }

    #[test]
    fn test_error_order_across_checks() {
        let report = validate(json!({
            "companies": {},
            "persons": {"alice": {"wage": {}}},
            "households": {"h1": {"adults": ["zoe"], "garden": {}}},
        }));
        assert_eq!(
            report.errors,
            vec![
                "Unknown entity type: 'companies'".to_string(),
                "Unknown variable 'wage' for person 'alice'".to_string(),
                "Person 'zoe' in households/h1/adults is not defined in persons".to_string(),
                "Unknown variable 'garden' for households 'h1'".to_string(),
            ]
        );
        assert_eq!(
            report.to_json(),
            json!({"valid": false, "errors": report.errors, "warnings": []})
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let situation = json!({
            "persons": {"alice": {"wage": {}}, "bob": {"bonus": {}}},
            "households": {"h1": {"adults": ["x", "y"]}},
            "firms": {},
        });
        assert_eq!(validate(situation.clone()), validate(situation));
    }

    #[test]
    fn test_non_list_role_value_is_not_checked() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "households": {"h1": {"adults": "bob"}},
        }));
        assert!(report.is_valid());
    }

    #[test]
    fn test_non_string_member_reported() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "households": {"h1": {"adults": [7]}},
        }));
        assert_eq!(
            report.errors,
            vec!["Person '7' in households/h1/adults is not defined in persons".to_string()]
        );
    }

    #[test]
    fn test_malformed_instances_warn() {
        let report = validate(json!({
            "persons": {"alice": 3, "bob": {}},
            "households": {"h1": ["bob"]},
        }));
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec![
                "Expected an object for persons 'alice'".to_string(),
                "Expected an object for households 'h1'".to_string(),
            ]
        );
    }

    #[test]
    fn test_malformed_collections_warn() {
        let report = validate(json!({
            "persons": {"alice": {}},
            "households": "h1",
        }));
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec!["Expected 'households' to map instance ids to instances".to_string()]
        );

        let report = validate(json!({"persons": ["alice"]}));
        assert_eq!(report.errors, vec!["At least one person must be defined".to_string()]);
        assert_eq!(
            report.warnings,
            vec!["Expected 'persons' to map instance ids to instances".to_string()]
        );
    }

    #[test]
    fn test_mixed_role_descriptors_only_match_keys() {
        let entities = EntityCatalog::new([
            EntityDefinition::individual("person", "persons"),
            EntityDefinition::group(
                "family",
                "families",
                [
                    RoleDescriptor::from_json("parent", &json!({"plural": "parents"})),
                    RoleDescriptor::from_json("child", &json!("child")),
                ],
            ),
        ]);
        let variables = VariableCatalog::new(["salary"]);
        let situation = Situation::from_argument(&json!({
            "persons": {"alice": {}},
            "families": {"f1": {"parent": ["alice"], "parents": ["alice"]}},
        }))
        .unwrap();

        let report = SituationValidator::new(&entities, &variables).validate(&situation);
        assert_eq!(
            report.errors,
            vec!["Unknown variable 'parents' for families 'f1'".to_string()]
        );
        assert_eq!(
            report.warnings,
            vec![
                "Role plural forms unavailable for 'family'; only role keys are recognized"
                    .to_string()
            ]
        );
    }
}
