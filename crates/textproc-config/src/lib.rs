//! Configuration for textproc
//!
//! Hierarchical configuration with discovery and precedence:
//! programmatic > environment > file > defaults. The TOML file has a
//! `[runner]` section (deadline, working directory, environment) and a
//! `[logging]` section.

pub mod config;
pub mod error;

pub use config::{
    Config, ConfigBuilder, ConfigSource, ENV_CONFIG, ENV_TIMEOUT_SECS, ENV_VERBOSE, LoggingConfig,
    RunnerConfig,
};
pub use error::ConfigError;
