//! Crate-level error type

use thiserror::Error;

pub use textproc_config::ConfigError;
pub use textproc_runner::RunnerError;
pub use textproc_text::{EncodingError, ParseError};

/// Coarse classification shared by every error this crate returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed UTF-8 or an invalid code point.
    Encoding,
    /// A string did not parse as an integer.
    Parse,
    /// A child process could not be started.
    Process,
    /// A pipe read/write or wait failed after the child started.
    Io,
    /// A child exceeded its deadline and was killed.
    Timeout,
    Configuration,
}

impl ErrorCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Encoding => "encoding",
            Self::Parse => "parse",
            Self::Process => "process",
            Self::Io => "io",
            Self::Timeout => "timeout",
            Self::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Encoding(_) | Self::Runner(RunnerError::Encoding(_)) => ErrorCategory::Encoding,
            Self::Parse(_) => ErrorCategory::Parse,
            Self::Runner(RunnerError::EmptyCommand | RunnerError::Spawn { .. }) => {
                ErrorCategory::Process
            }
            Self::Runner(RunnerError::Io { .. }) => ErrorCategory::Io,
            Self::Runner(RunnerError::Timeout { .. }) => ErrorCategory::Timeout,
            Self::Config(_) => ErrorCategory::Configuration,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
