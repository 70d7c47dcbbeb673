//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the
//! `{name, description, inputSchema}` listing agents discover tools from.

use fisca_application::ToolSchemaPort;
use fisca_domain::tool::entities::ToolDefinition;
use serde_json::{Map, Value, json};

/// Default implementation producing JSON Schema.
///
/// Parameter types map one to one: `string` → `"string"`,
/// `object` → `"object"`.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}
