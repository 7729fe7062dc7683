//! Error types for runner module

use std::fmt;
use std::io;
use textproc_text::EncodingError;
use thiserror::Error;

/// Which of the child's channels an I/O failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stdin,
    Stdout,
    Stderr,
    /// Waiting for the child to exit.
    Wait,
}

impl Channel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stdin => "stdin",
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Wait => "wait",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process execution errors
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Command vector is empty")]
    EmptyCommand,

    /// The child could not be started. No channel stays open after this.
    #[error("Failed to spawn process '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A read or write on an established channel failed.
    #[error("I/O error on child {channel}: {source}")]
    Io {
        channel: Channel,
        #[source]
        source: io::Error,
    },

    #[error("Execution timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },

    #[error("Child output is not valid UTF-8: {0}")]
    Encoding(#[from] EncodingError),
}

impl RunnerError {
    pub(crate) fn io(channel: Channel) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { channel, source }
    }
}
