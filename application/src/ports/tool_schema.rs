//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain, [`ToolSpec`]) from "how they are
//! advertised" (infrastructure, JSON Schema).

use fisca_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to their advertised JSON Schema form.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to `{name, description, inputSchema}`.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools, in catalog order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all().map(|tool| self.tool_to_schema(tool)).collect()
    }
}
