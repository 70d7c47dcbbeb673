//! The tool catalog offered to agents.
//!
//! Names, descriptions and parameters of every tool, registered in the order
//! agents should discover them: exploration first, then calculation, then
//! validation.

use fisca_domain::DefinitionPeriod;
use fisca_domain::tool::entities::{ParamType, ToolDefinition, ToolParameter, ToolSpec};

pub const LIST_ENTITIES: &str = "list_entities";
pub const LIST_VARIABLES: &str = "list_variables";
pub const DESCRIBE_VARIABLE: &str = "describe_variable";
pub const LIST_PARAMETERS: &str = "list_parameters";
pub const GET_PARAMETER: &str = "get_parameter";
pub const SEARCH_VARIABLES: &str = "search_variables";
pub const CALCULATE: &str = "calculate";
pub const TRACE_CALCULATION: &str = "trace_calculation";
pub const VALIDATE_SITUATION: &str = "validate_situation";

const SITUATION_SHAPE: &str = r#"Situation structure:
{
  "persons": {
    "<person_id>": {
      "<variable_name>": {"<period>": <value or null>}
    }
  },
  "households": {
    "<household_id>": {
      "adults": ["<person_id>"],
      "children": ["<person_id>"],
      "<variable_name>": {"<period>": <value or null>}
    }
  }
}"#;

/// Definition periods explained in tool descriptions.
const DESCRIBED_PERIODS: [DefinitionPeriod; 4] = [
    DefinitionPeriod::Month,
    DefinitionPeriod::Year,
    DefinitionPeriod::Day,
    DefinitionPeriod::Eternity,
];

/// Period-key guidance, one line per definition period.
fn period_formats() -> String {
    let mut text = String::from("Period keys follow the variable's definitionPeriod:");
    for period in DESCRIBED_PERIODS {
        if period.example() == period.period_format() {
            text.push_str(&format!(
                "\n- {}: '{}' for values that never change",
                period,
                period.period_format()
            ));
        } else {
            text.push_str(&format!(
                "\n- {}: '{}' (e.g. '{}')",
                period,
                period.period_format(),
                period.example()
            ));
        }
    }
    text
}

/// Build the full tool catalog.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(list_entities_definition())
        .register(list_variables_definition())
        .register(describe_variable_definition())
        .register(list_parameters_definition())
        .register(get_parameter_definition())
        .register(search_variables_definition())
        .register(calculate_definition())
        .register(trace_calculation_definition())
        .register(validate_situation_definition())
}

fn list_entities_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_ENTITIES,
        "List the entity types of the tax-benefit system.\n\n\
         Returns every entity (person, household, ...) with its plural form and, \
         for group entities, its roles. Call this before building a situation: \
         the plural forms are the situation's top-level keys and the role keys \
         or role plurals are how members are assigned to groups.",
    )
}

fn list_variables_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_VARIABLES,
        "List the variables of the tax-benefit system.\n\n\
         Returns variable names with their descriptions. This is where to \
         discover what the rule set can compute. Pass an entity to keep only \
         the variables defined on it; follow up with describe_variable for \
         the details of one variable.",
    )
    .with_parameter(ToolParameter::new(
        "entity",
        "Only list variables of this entity (e.g. 'person', 'household')",
        false,
    ))
}

fn describe_variable_definition() -> ToolDefinition {
    ToolDefinition::new(
        DESCRIBE_VARIABLE,
        format!(
            "Describe one variable in detail.\n\n\
             Returns its valueType (Float, Int, Boolean, String, Date), its \
             definitionPeriod, the entity it belongs to, a description, its \
             formulas with their start dates and its legislative references.\n\n\
             {}",
            period_formats()
        ),
    )
    .with_parameter(ToolParameter::new(
        "variable_name",
        "The variable name (e.g. 'salary', 'income_tax')",
        true,
    ))
}

fn list_parameters_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_PARAMETERS,
        "List the parameters of the tax-benefit system.\n\n\
         Parameters are the legislated rates, thresholds and amounts that \
         change over time. Use get_parameter to read one parameter's history.",
    )
}

fn get_parameter_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_PARAMETER,
        "Get a parameter's values over time.\n\n\
         Simple parameters return a value per start date; scales return their \
         brackets of thresholds and rates; parameter nodes return their \
         sub-parameters.",
    )
    .with_parameter(ToolParameter::new(
        "parameter_id",
        "The parameter id (e.g. 'taxes.income_tax_rate')",
        true,
    ))
}

fn search_variables_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_VARIABLES,
        "Search variables by keyword.\n\n\
         Matches the query, case-insensitively, against variable names and \
         descriptions. Use this when the exact variable name is unknown.",
    )
    .with_parameter(ToolParameter::new(
        "query",
        "Search term (e.g. 'tax', 'allowance', 'income')",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "entity",
        "Only return variables of this entity",
        false,
    ))
}

fn calculate_definition() -> ToolDefinition {
    ToolDefinition::new(
        CALCULATE,
        format!(
            "Calculate variables for a situation.\n\n\
             The situation lists people, their groups and the values already \
             known. Set a variable's period to null to request its calculation; \
             the response is the same situation with the nulls filled in.\n\n\
             {}\n\n{}",
            SITUATION_SHAPE,
            period_formats()
        ),
    )
    .with_parameter(situation_parameter(
        "The situation with persons, households and variables",
    ))
}

fn trace_calculation_definition() -> ToolDefinition {
    ToolDefinition::new(
        TRACE_CALCULATION,
        "Calculate with a full dependency trace.\n\n\
         Same input as calculate. The response also lists the requested \
         calculations and, for every computed value, the variables it depended \
         on and the parameter values it used. Use this to explain why a result \
         was reached.",
    )
    .with_parameter(situation_parameter(
        "The situation with persons, households and variables",
    ))
}

fn validate_situation_definition() -> ToolDefinition {
    ToolDefinition::new(
        VALIDATE_SITUATION,
        "Check a situation's structure without calculating.\n\n\
         Reports unknown entity types, missing persons, unknown variables and \
         role assignments that reference undefined persons. Period formats are \
         left to the engine. Run this before calculate to catch mistakes early.",
    )
    .with_parameter(situation_parameter("The situation to validate"))
}

fn situation_parameter(description: &str) -> ToolParameter {
    ToolParameter::new("situation", description, true).with_type(ParamType::Object)
}
