//! Output formatter trait

use fisca_domain::{ToolOutput, ToolSpec};

/// Trait for formatting tool listings and tool results
pub trait OutputFormatter {
    /// Human-readable summary of the available tools
    fn format_tools(&self, spec: &ToolSpec) -> String;

    /// The result of one tool call, as returned to the caller
    fn format_output(&self, output: &ToolOutput) -> String;

    /// One-line status of a tool call
    fn format_status(&self, tool: &str, output: &ToolOutput) -> String;
}
