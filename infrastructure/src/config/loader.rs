//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_FILES: [&str; 2] = ["openfisca-tools.toml", ".openfisca-tools.toml"];

/// Engine address override.
pub const ENV_API_URL: &str = "OPENFISCA_API_URL";

/// Request timeout override, in seconds.
pub const ENV_TIMEOUT_SECONDS: &str = "OPENFISCA_TIMEOUT_SECONDS";

/// Prefix of generic overrides (`OPENFISCA_TOOLS_ENGINE__BASE_URL`, ...).
pub const ENV_PREFIX: &str = "OPENFISCA_TOOLS_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `OPENFISCA_API_URL`, `OPENFISCA_TIMEOUT_SECONDS`,
    ///    then `OPENFISCA_TOOLS_*`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./openfisca-tools.toml` or `./.openfisca-tools.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/openfisca-tools/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Defaults plus environment, no files (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[ENV_TIMEOUT_SECONDS])
                    .map(|_| "engine.timeout_seconds".into()),
            )
            .merge(
                Env::raw()
                    .only(&[ENV_API_URL])
                    .map(|_| "engine.base_url".into()),
            )
    }

    /// Get the global config file path
    ///
    /// `$XDG_CONFIG_HOME/openfisca-tools/config.toml`, falling back to the
    /// platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("openfisca-tools").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config sources considered (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> String {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        for var in [ENV_API_URL, ENV_TIMEOUT_SECONDS] {
            let mark = if std::env::var_os(var).is_some() { "SET  " } else { "     " };
            lines.push(format!("  [{}] Env:     {}", mark, var));
        }
        lines.push(format!("  [     ] Env:     {}*", ENV_PREFIX));

        if let Some(path) = config_path {
            lines.push(format!("  [{}] Config:  {}", found(path), path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_CONFIG_FILES[0], PROJECT_CONFIG_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            lines.push(format!("  [{}] Global:  {}", found(&path), path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines.join("\n")
    }
}

fn found(path: &Path) -> &'static str {
    if path.exists() { "FOUND" } else { "     " }
}
