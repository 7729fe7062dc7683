//! Synchronous subprocess execution
//!
//! Spawns a command with piped stdio, writes the caller's input to its
//! stdin, and captures stdout and stderr in full. All three channels are
//! serviced concurrently so a child producing large output on either stream
//! cannot deadlock the runner.
//!
//! # Security Model
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style
//! invocation. Arguments are passed as discrete elements and never through
//! a shell.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::{Channel, RunnerError};
pub use native::NativeRunner;
pub use process::{ExecutionResult, ProcessRunner, TextOutput};
