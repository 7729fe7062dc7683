use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

use super::{Config, ConfigSource};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// Use this when embedding the library and the configuration should not
    /// depend on environment variables or files.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textproc_config::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::builder()
    ///     .timeout(Duration::from_secs(5))
    ///     .env("LC_ALL", "C.UTF-8")
    ///     .build()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration.
///
/// # Source Attribution
///
/// Every value set on the builder is attributed to
/// [`ConfigSource::Programmatic`] in the resulting [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    timeout_secs: Option<u64>,
    working_dir: Option<PathBuf>,
    inherit_env: Option<bool>,
    env: BTreeMap<String, String>,
    verbose: Option<bool>,
    filter: Option<String>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Deadline for child processes, rounded up to whole seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout
            .as_secs()
            .saturating_add(u64::from(timeout.subsec_nanos() > 0));
        self.timeout_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = Some(inherit);
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// `EnvFilter` directive used by the logging setup.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Build on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, an empty
    /// working directory, or a malformed environment variable name.
    pub fn build(self) -> Result<Config, ConfigError> {
        self.build_on(Config::default())
    }

    /// Build on top of an existing configuration, e.g. one returned by
    /// [`Config::discover`]. Builder values take precedence.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_on(self, mut config: Config) -> Result<Config, ConfigError> {
        let source = ConfigSource::Programmatic;

        if let Some(secs) = self.timeout_secs {
            config.runner.timeout_secs = Some(secs);
            config.attribute("runner.timeout_secs", &source);
        }
        if let Some(dir) = self.working_dir {
            config.runner.working_dir = Some(dir);
            config.attribute("runner.working_dir", &source);
        }
        if let Some(inherit) = self.inherit_env {
            config.runner.inherit_env = Some(inherit);
            config.attribute("runner.inherit_env", &source);
        }
        if !self.env.is_empty() {
            config.runner.env.extend(self.env);
            config.attribute("runner.env", &source);
        }
        if let Some(verbose) = self.verbose {
            config.logging.verbose = Some(verbose);
            config.attribute("logging.verbose", &source);
        }
        if let Some(filter) = self.filter {
            config.logging.filter = Some(filter);
            config.attribute("logging.filter", &source);
        }

        config.validate()?;
        Ok(config)
    }
}
