//! CLI entrypoint for openfisca-tools
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use fisca_application::catalog::VALIDATE_SITUATION;
use fisca_application::{RuleEngine, ToolDispatcher, ToolSchemaPort};
use fisca_domain::ToolCall;
use fisca_infrastructure::{
    ConfigLoader, EngineConnection, FileConfig, HttpRuleEngine, JsonSchemaToolConverter,
};
use fisca_presentation::{Cli, Command, ConsoleFormatter, parse_tool_arguments};
use serde_json::{Map, Value};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    // stdout carries tool output only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    info!(url = %config.engine.base_url, "Starting openfisca-tools");

    // === Dependency Injection ===
    // One connection for the whole process, released before exit
    let connection = Arc::new(config.engine_connection());
    let engine: Arc<dyn RuleEngine> = Arc::new(HttpRuleEngine::new(connection.clone()));
    let dispatcher = ToolDispatcher::new(engine).with_config(config.behavior());

    execute(cli.effective_command(), &dispatcher, &connection).await
}

/// Run one command, then release the connection whatever the outcome.
async fn execute(
    command: Command,
    dispatcher: &ToolDispatcher,
    connection: &EngineConnection,
) -> Result<ExitCode> {
    let result = run(command, dispatcher).await;

    debug!(opened = connection.is_open(), "Releasing engine connection");
    connection.close();
    result
}

/// Run one command against the dispatcher.
async fn run(command: Command, dispatcher: &ToolDispatcher) -> Result<ExitCode> {
    match command {
        Command::Tools { schema: true } => {
            let schemas = JsonSchemaToolConverter.all_tools_schema(dispatcher.tool_spec());
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Tools { schema: false } => {
            print!("{}", ConsoleFormatter::format_tools(dispatcher.tool_spec()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Call {
            tool,
            args,
            args_file,
        } => {
            let arguments = match (args, args_file) {
                (Some(text), _) => parse_arguments(&text)?,
                (None, Some(path)) => parse_arguments(&read_file(&path)?)?,
                (None, None) => Map::new(),
            };
            let call = ToolCall::new(tool).with_arguments(arguments);
            Ok(run_call(dispatcher, &call).await)
        }
        Command::Validate { path } => {
            let text = read_file(&path)?;
            let situation: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            let call = ToolCall::new(VALIDATE_SITUATION).with_arg("situation", situation);
            Ok(run_call(dispatcher, &call).await)
        }
    }
}

/// Load configuration, apply command-line overrides, and validate.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    if let Some(base_url) = &cli.base_url {
        config.engine.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.engine.timeout_seconds = timeout;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run_call(dispatcher: &ToolDispatcher, call: &ToolCall) -> ExitCode {
    let output = dispatcher.dispatch(call).await;
    eprintln!("{}", ConsoleFormatter::format_status(&call.tool_name, &output));
    println!("{}", ConsoleFormatter::format_output(&output));

    if output.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_arguments(text: &str) -> Result<Map<String, Value>> {
    parse_tool_arguments(text).map_err(anyhow::Error::msg)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiring() -> (ToolDispatcher, Arc<EngineConnection>) {
        let connection = Arc::new(EngineConnection::new(
            "http://127.0.0.1:1",
            std::time::Duration::from_secs(1),
        ));
        let engine: Arc<dyn RuleEngine> = Arc::new(HttpRuleEngine::new(connection.clone()));
        (ToolDispatcher::new(engine), connection)
    }

    #[tokio::test]
    async fn test_connection_closed_after_bad_arguments() {
        let (dispatcher, connection) = wiring();
        connection.client().unwrap();

        let command = Command::Call {
            tool: "describe_variable".to_string(),
            args: Some("[1, 2]".to_string()),
            args_file: None,
        };
        let err = execute(command, &dispatcher, &connection).await.unwrap_err();

        assert!(err.to_string().contains("must be a JSON object"));
        assert!(!connection.is_open());
    }

    #[tokio::test]
    async fn test_connection_closed_after_missing_situation_file() {
        let (dispatcher, connection) = wiring();
        connection.client().unwrap();

        let command = Command::Validate {
            path: "does-not-exist/situation.json".into(),
        };
        let err = execute(command, &dispatcher, &connection).await.unwrap_err();

        assert!(err.to_string().starts_with("Failed to read"));
        assert!(!connection.is_open());
    }

    #[tokio::test]
    async fn test_failed_tool_call_exits_with_failure() {
        let (dispatcher, connection) = wiring();

        let command = Command::Call {
            tool: "list_entities".to_string(),
            args: None,
            args_file: None,
        };
        let exit = execute(command, &dispatcher, &connection).await.unwrap();

        assert_eq!(exit, ExitCode::FAILURE);
        assert!(!connection.is_open());
    }
}
