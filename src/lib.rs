//! textproc - code point text handling and subprocess execution
//!
//! Text is held as sequences of Unicode code points (`Vec<char>`, or raw
//! `u32` values at the encoding boundary) so indexing and display width are
//! per character rather than per byte.
//!
//! - UTF-8 ⇄ UTF-32 conversion with strict validation ([`decode_utf8`],
//!   [`encode_utf32`])
//! - terminal display width ([`width`], [`str_width`])
//! - split, prefix test, replace, bracket extraction and integer parsing
//!   over code point sequences ([`strops`])
//! - running an external command with piped stdio, feeding it input and
//!   capturing both output streams without deadlock ([`NativeRunner`])
//!
//! # Quick Start
//!
//! ```rust
//! use textproc::{decode_utf8, str_width, strops};
//!
//! let text = decode_utf8("[名前]=ｱｲ".as_bytes()).unwrap();
//! let names = strops::extract_bracketed(&text, &['['], &[']']);
//! assert_eq!(names, vec!["名前".chars().collect::<Vec<_>>()]);
//! assert_eq!(str_width(&text), 1 + 4 + 1 + 1 + 2);
//! ```
//!
//! ```rust,no_run
//! use textproc::{CommandSpec, NativeRunner, ProcessRunner};
//!
//! let result = NativeRunner::new()
//!     .run(&CommandSpec::new("sort"), b"b\na\n")
//!     .unwrap();
//! assert_eq!(result.stdout, b"a\nb\n");
//! ```
//!
//! # Configuration
//!
//! [`Config::discover`] loads `.textproc/config.toml` (or the file named by
//! `TEXTPROC_CONFIG`) and applies environment overrides; see
//! [`textproc_config`] for the file format.
//!
//! # Logging
//!
//! The library emits `tracing` events and never prints. Call
//! [`logging::init_tracing`] to see them.

pub mod error;
pub mod logging;

pub use error::{Error, ErrorCategory, Result};

use tracing::debug;

pub use textproc_text::{codec, strops};
pub use textproc_text::{
    DisplayWidth, EncodingError, EncodingErrorKind, ParseError, decode_utf8,
    decode_utf8_until_nul, encode_single, encode_utf32, read_code_points, str_width, width,
};

pub use textproc_runner::{
    Channel, CommandSpec, ExecutionResult, NativeRunner, ProcessRunner, RunnerError, TextOutput,
};

pub use textproc_config::{Config, ConfigBuilder, ConfigError, ConfigSource};

/// Run `argv` (program first) with `input` on stdin, using the default
/// runner: no deadline and the caller's environment.
///
/// # Errors
///
/// [`ErrorCategory::Process`] when `argv` is empty or the program cannot be
/// started, [`ErrorCategory::Io`] when a pipe fails.
pub fn run<I, S>(argv: I, input: &[u8]) -> Result<ExecutionResult>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    let spec = CommandSpec::from_argv(argv)?;
    Ok(NativeRunner::new().run(&spec, input)?)
}

/// Run `argv` with settings from `config`: its deadline, working directory
/// and environment.
///
/// # Errors
///
/// As [`run`], plus [`ErrorCategory::Timeout`] when the configured deadline
/// expires.
pub fn run_with_config<I, S>(config: &Config, argv: I, input: &[u8]) -> Result<ExecutionResult>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    let spec = config.apply(CommandSpec::from_argv(argv)?);
    debug!(
        program = %spec.display_program(),
        timeout_secs = ?config.runner.timeout_secs,
        cwd = ?spec.cwd,
        clear_env = spec.clear_env,
        "Running configured command"
    );
    Ok(config.native_runner().run(&spec, input)?)
}

/// Text-level [`run`]: `input` is UTF-8 encoded on the way in and both
/// output streams are decoded on the way out.
///
/// # Errors
///
/// As [`run`], plus [`ErrorCategory::Encoding`] for an invalid input code
/// point or output that is not valid UTF-8.
pub fn run_text<I, S>(argv: I, input: &[char]) -> Result<TextOutput>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    let spec = CommandSpec::from_argv(argv)?;
    Ok(NativeRunner::new().run_text(&spec, input)?)
}
