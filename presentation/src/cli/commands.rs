//! CLI command definitions

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// CLI arguments for openfisca-tools
#[derive(Parser, Debug)]
#[command(name = "openfisca-tools")]
#[command(author, version, about = "Agent tools over an OpenFisca tax-benefit engine")]
#[command(long_about = r#"
Exposes an OpenFisca engine's HTTP API as agent tools: discover entities,
variables and parameters, run and trace calculations, and validate situations
before submitting them.

Tool output goes to stdout; logs go to stderr.

Configuration is loaded from (in priority order):
1. OPENFISCA_API_URL, OPENFISCA_TIMEOUT_SECONDS, OPENFISCA_TOOLS_*
2. --config <path>              Explicit config file
3. ./openfisca-tools.toml       Project-level config
4. ~/.config/openfisca-tools/config.toml   Global config

Example:
  openfisca-tools tools
  openfisca-tools call describe_variable --args '{"variable_name": "salary"}'
  openfisca-tools call calculate --args-file situation.json
  openfisca-tools validate situation.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Engine base URL (overrides configuration)
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available tools (default)
    Tools {
        /// Print the JSON Schema listing instead of a summary
        #[arg(long)]
        schema: bool,
    },

    /// Invoke one tool and print its result
    Call {
        /// Tool name (e.g. list_entities)
        tool: String,

        /// Arguments as a JSON object
        #[arg(short, long, value_name = "JSON", conflicts_with = "args_file")]
        args: Option<String>,

        /// Read the arguments from a JSON file
        #[arg(long, value_name = "PATH")]
        args_file: Option<PathBuf>,
    },

    /// Validate a situation file without calculating
    Validate {
        /// Path to a situation JSON file
        path: PathBuf,
    },
}

impl Cli {
    /// The command to run; listing the tools when none is given.
    pub fn effective_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Tools { schema: false })
    }
}

/// Parse tool arguments given as JSON text.
///
/// Blank text means no arguments; anything else must be a JSON object.
pub fn parse_tool_arguments(text: &str) -> Result<Map<String, Value>, String> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(arguments)) => Ok(arguments),
        Ok(other) => Err(format!(
            "Tool arguments must be a JSON object, got {}",
            json_type_name(&other)
        )),
        Err(e) => Err(format!("Tool arguments are not valid JSON: {}", e)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
