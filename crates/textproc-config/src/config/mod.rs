//! Configuration management
//!
//! Hierarchical configuration with discovery and precedence:
//! programmatic > environment > file > defaults. Files are TOML with
//! `[runner]` and `[logging]` sections.

mod builder;
mod discovery;
mod model;

pub use builder::ConfigBuilder;
pub use discovery::{ENV_CONFIG, ENV_TIMEOUT_SECS, ENV_VERBOSE};
pub use model::{Config, ConfigSource, LoggingConfig, RunnerConfig};
