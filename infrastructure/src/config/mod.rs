//! Configuration loading for openfisca-tools
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment (`OPENFISCA_API_URL`, `OPENFISCA_TIMEOUT_SECONDS`, `OPENFISCA_TOOLS_*`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./openfisca-tools.toml` or `./.openfisca-tools.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/openfisca-tools/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileEngineConfig, FileToolsConfig};
pub use loader::ConfigLoader;
