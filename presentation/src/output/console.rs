//! Console output formatter for tool listings and results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use fisca_domain::{ToolOutput, ToolSpec};
use serde_json::Value;

/// Formats tool listings and results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the tool catalog with one summary line per tool
    pub fn format_tools(spec: &ToolSpec) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("OpenFisca Tools"));
        output.push('\n');

        for tool in spec.all() {
            output.push_str(&format!(
                "\n{}\n  {}\n",
                tool.name.yellow().bold(),
                tool.summary()
            ));

            for param in &tool.parameters {
                let marker = if param.required {
                    "required".red()
                } else {
                    "optional".dimmed()
                };
                output.push_str(&format!(
                    "    {} {} ({}, {})\n",
                    "-".dimmed(),
                    param.name.cyan(),
                    param.param_type,
                    marker
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a tool result exactly as a tool caller receives it
    pub fn format_output(output: &ToolOutput) -> String {
        output.render()
    }

    /// Status line for stderr
    pub fn format_status(tool: &str, output: &ToolOutput) -> String {
        match output {
            ToolOutput::Success(value) => match validation_verdict(value) {
                Some(true) => format!(
                    "{} {} {}",
                    "OK".green().bold(),
                    tool,
                    "situation is valid".green()
                ),
                Some(false) => format!(
                    "{} {} {}",
                    "INVALID".yellow().bold(),
                    tool,
                    issue_counts(value).yellow()
                ),
                None => format!("{} {}", "OK".green().bold(), tool),
            },
            ToolOutput::Failure(err) => format!(
                "{} {} {} ({}): {}",
                "ERROR".red().bold(),
                tool,
                err.kind.as_str().red(),
                err.code,
                err.message
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

/// `valid` flag of a situation validation payload, if this is one
fn validation_verdict(value: &Value) -> Option<bool> {
    match (value.get("valid"), value.get("warnings")) {
        (Some(Value::Bool(valid)), Some(Value::Array(_))) => Some(*valid),
        _ => None,
    }
}

fn issue_counts(value: &Value) -> String {
    let count = |key: &str| value.get(key).and_then(Value::as_array).map_or(0, Vec::len);
    format!("{} error(s), {} warning(s)", count("errors"), count("warnings"))
}

impl OutputFormatter for ConsoleFormatter {
    fn format_tools(&self, spec: &ToolSpec) -> String {
        Self::format_tools(spec)
    }

    fn format_output(&self, output: &ToolOutput) -> String {
        Self::format_output(output)
    }

    fn format_status(&self, tool: &str, output: &ToolOutput) -> String {
        Self::format_status(tool, output)
    }
}
