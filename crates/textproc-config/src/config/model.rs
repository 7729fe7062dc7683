use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use textproc_runner::{CommandSpec, NativeRunner};

/// Where an effective configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in default value (lowest precedence).
    Default,
    /// Value loaded from a configuration file.
    ConfigFile(PathBuf),
    /// Value read from an environment variable.
    Environment(String),
    /// Value provided through [`Config::builder()`] (highest precedence).
    Programmatic,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::ConfigFile(path) => write!(f, "config file ({})", path.display()),
            Self::Environment(var) => write!(f, "environment ({var})"),
            Self::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// Effective configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Subprocess execution settings.
    pub runner: RunnerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Source attribution for each setting, keyed by `section.field`.
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// `[runner]` section
///
/// ```toml
/// [runner]
/// timeout_secs = 30
/// working_dir = "/srv/data"
/// inherit_env = true
///
/// [runner.env]
/// LC_ALL = "C.UTF-8"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Kill the child after this many seconds. Unset means wait forever.
    pub timeout_secs: Option<u64>,
    /// Working directory for children; unset inherits the caller's.
    pub working_dir: Option<PathBuf>,
    /// Whether children inherit the caller's environment (default `true`).
    pub inherit_env: Option<bool>,
    /// Environment overrides applied to every child.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// `EnvFilter` directive, e.g. `"textproc=debug"`.
    pub filter: Option<String>,
}

pub(crate) const ATTRIBUTED_KEYS: [&str; 6] = [
    "runner.timeout_secs",
    "runner.working_dir",
    "runner.inherit_env",
    "runner.env",
    "logging.verbose",
    "logging.filter",
];

impl Default for Config {
    fn default() -> Self {
        let source_attribution = ATTRIBUTED_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();

        Self {
            runner: RunnerConfig::default(),
            logging: LoggingConfig::default(),
            source_attribution,
        }
    }
}

impl Config {
    /// Deadline for child processes, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.runner.timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn inherit_env(&self) -> bool {
        self.runner.inherit_env.unwrap_or(true)
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    /// Where the effective value of `key` (`section.field`) came from.
    #[must_use]
    pub fn source_of(&self, key: &str) -> Option<&ConfigSource> {
        self.source_attribution.get(key)
    }

    /// A runner honouring the configured deadline.
    #[must_use]
    pub fn native_runner(&self) -> NativeRunner {
        match self.timeout() {
            Some(timeout) => NativeRunner::with_timeout(timeout),
            None => NativeRunner::new(),
        }
    }

    /// Fill in configured working directory and environment on `spec`.
    ///
    /// Settings already present on `spec` win over configured ones.
    #[must_use]
    pub fn apply(&self, mut spec: CommandSpec) -> CommandSpec {
        if spec.cwd.is_none() {
            spec.cwd.clone_from(&self.runner.working_dir);
        }

        for (key, value) in &self.runner.env {
            let env = spec.env.get_or_insert_with(HashMap::new);
            env.entry(key.into()).or_insert_with(|| value.into());
        }

        if !self.inherit_env() {
            spec.clear_env = true;
        }
        spec
    }

    /// Render the effective settings as TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            runner: &'a RunnerConfig,
            logging: &'a LoggingConfig,
        }

        toml::to_string(&View {
            runner: &self.runner,
            logging: &self.logging,
        })
    }
}
