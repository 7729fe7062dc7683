use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::{Config, ConfigSource, LoggingConfig, RunnerConfig};
use crate::error::ConfigError;

/// Explicit config file path; skips discovery.
pub const ENV_CONFIG: &str = "TEXTPROC_CONFIG";
/// Overrides `runner.timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "TEXTPROC_TIMEOUT_SECS";
/// Overrides `logging.verbose`.
pub const ENV_VERBOSE: &str = "TEXTPROC_VERBOSE";

const CONFIG_DIR: &str = ".textproc";
const CONFIG_FILE: &str = "config.toml";

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    runner: Option<RunnerConfig>,
    logging: Option<LoggingConfig>,
}

impl Config {
    /// Discover and load configuration with precedence: environment > file > defaults
    ///
    /// Searches upward from the current directory, then falls back to the
    /// user's config directory (`<config dir>/textproc/config.toml`).
    pub fn discover() -> Result<Self, ConfigError> {
        let start_dir = env::current_dir().map_err(|source| ConfigError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        let path = Self::explicit_config_file()
            .or_else(|| Self::discover_config_file_from(&start_dir))
            .or_else(Self::user_config_file);
        Self::load(path.as_deref())
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// This is the path-driven variant used by tests: it never consults the
    /// user config directory.
    pub fn discover_from(start_dir: &Path) -> Result<Self, ConfigError> {
        let path =
            Self::explicit_config_file().or_else(|| Self::discover_config_file_from(start_dir));
        Self::load(path.as_deref())
    }

    /// Load a specific file on top of the defaults. Environment overrides are
    /// not applied.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from("<inline>");
        let file: TomlConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut config = Self::default();
        config.merge(file, &ConfigSource::ConfigFile(path));
        config.validate()?;
        Ok(config)
    }

    /// Find `.textproc/config.toml` in `start_dir` or any ancestor.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    fn explicit_config_file() -> Option<PathBuf> {
        env::var_os(ENV_CONFIG)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("textproc").join(CONFIG_FILE))
            .filter(|path| path.is_file())
    }

    fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.merge_file(path)?;
        }
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TomlConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        self.merge(file, &ConfigSource::ConfigFile(path.to_path_buf()));
        Ok(())
    }

    fn merge(&mut self, file: TomlConfig, source: &ConfigSource) {
        if let Some(runner) = file.runner {
            if runner.timeout_secs.is_some() {
                self.runner.timeout_secs = runner.timeout_secs;
                self.attribute("runner.timeout_secs", source);
            }
            if runner.working_dir.is_some() {
                self.runner.working_dir = runner.working_dir;
                self.attribute("runner.working_dir", source);
            }
            if runner.inherit_env.is_some() {
                self.runner.inherit_env = runner.inherit_env;
                self.attribute("runner.inherit_env", source);
            }
            if !runner.env.is_empty() {
                self.runner.env.extend(runner.env);
                self.attribute("runner.env", source);
            }
        }

        if let Some(logging) = file.logging {
            if logging.verbose.is_some() {
                self.logging.verbose = logging.verbose;
                self.attribute("logging.verbose", source);
            }
            if logging.filter.is_some() {
                self.logging.filter = logging.filter;
                self.attribute("logging.filter", source);
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = env::var(ENV_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS.to_string(),
                    value: value.clone(),
                })?;
            self.runner.timeout_secs = Some(secs);
            self.attribute(
                "runner.timeout_secs",
                &ConfigSource::Environment(ENV_TIMEOUT_SECS.to_string()),
            );
        }

        if let Ok(value) = env::var(ENV_VERBOSE) {
            let verbose = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_VERBOSE.to_string(),
                        value,
                    });
                }
            };
            self.logging.verbose = Some(verbose);
            self.attribute(
                "logging.verbose",
                &ConfigSource::Environment(ENV_VERBOSE.to_string()),
            );
        }

        Ok(())
    }

    pub(crate) fn attribute(&mut self, key: &str, source: &ConfigSource) {
        self.source_attribution
            .insert(key.to_string(), source.clone());
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.runner.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "runner.timeout_secs".to_string(),
                value: "0 (must be at least 1 second; omit it to disable the deadline)"
                    .to_string(),
            });
        }

        if let Some(dir) = &self.runner.working_dir
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                key: "runner.working_dir".to_string(),
                value: "empty path".to_string(),
            });
        }

        if self.runner.env.keys().any(|key| key.is_empty() || key.contains('=')) {
            return Err(ConfigError::InvalidValue {
                key: "runner.env".to_string(),
                value: "variable names must be non-empty and must not contain '='".to_string(),
            });
        }

        Ok(())
    }
}
