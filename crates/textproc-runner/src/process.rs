use crate::error::RunnerError;
use textproc_text::{decode_utf8, encode_utf32};

use super::CommandSpec;

// ============================================================================
// ProcessRunner Trait - run a command with piped stdio
// ============================================================================

/// Outcome of one completed process execution.
///
/// Both streams have been read to end of stream before this is built, so
/// the captured output is always complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code. On Unix a child killed by a signal reports `128 + signal`;
    /// `-1` when the platform reports neither.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecutionResult {
    #[must_use]
    pub fn new(exit_code: i32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Decode both streams into code points.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Encoding`] if either stream is not valid UTF-8.
    pub fn into_text(self) -> Result<TextOutput, RunnerError> {
        Ok(TextOutput {
            exit_code: self.exit_code,
            stdout: decode_utf8(&self.stdout)?,
            stderr: decode_utf8(&self.stderr)?,
        })
    }
}

/// [`ExecutionResult`] with both streams decoded to code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOutput {
    pub exit_code: i32,
    pub stdout: Vec<char>,
    pub stderr: Vec<char>,
}

impl TextOutput {
    #[must_use]
    pub fn stdout_string(&self) -> String {
        self.stdout.iter().collect()
    }

    #[must_use]
    pub fn stderr_string(&self) -> String {
        self.stderr.iter().collect()
    }
}

/// Trait for process execution.
///
/// Implementations take an argv-style [`CommandSpec`] (no shell), write
/// `input` to the child's stdin and close it, and capture stdout and stderr
/// in full. The interface is synchronous; implementations may drive an async
/// runtime internally but must not expose one.
pub trait ProcessRunner {
    /// Run `cmd` to completion, feeding it `input`.
    ///
    /// # Errors
    ///
    /// * [`RunnerError::Spawn`] - the child could not be started
    /// * [`RunnerError::Io`] - a pipe read or write failed after start
    /// * [`RunnerError::Timeout`] - the child exceeded the runner's deadline
    fn run(&self, cmd: &CommandSpec, input: &[u8]) -> Result<ExecutionResult, RunnerError>;

    /// Text-level wrapper around [`run`](Self::run).
    ///
    /// `input` is encoded as UTF-8 at the boundary and the child's output is
    /// decoded back into code points.
    ///
    /// # Errors
    ///
    /// Everything [`run`](Self::run) can return, plus
    /// [`RunnerError::Encoding`] when the input holds an invalid code point
    /// or the child's output is not valid UTF-8.
    fn run_text<C>(&self, cmd: &CommandSpec, input: &[C]) -> Result<TextOutput, RunnerError>
    where
        C: Copy + Into<u32>,
        Self: Sized,
    {
        let bytes = encode_utf32(input)?;
        self.run(cmd, &bytes)?.into_text()
    }
}
