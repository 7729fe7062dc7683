use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;

use crate::error::RunnerError;

// ============================================================================
// CommandSpec - argv-style command description
// ============================================================================

/// A command to execute: program plus discrete arguments.
///
/// Arguments are never joined into a shell string, so shell metacharacters
/// reach the child verbatim. The program is resolved with the platform's
/// usual executable lookup (`PATH` on Unix).
///
/// By default the child inherits the caller's environment and working
/// directory.
///
/// # Example
///
/// ```rust
/// use textproc_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("sort")
///     .arg("-r")
///     .cwd("/tmp")
///     .env("LC_ALL", "C");
///
/// assert_eq!(cmd.program, OsString::from("sort"));
/// assert_eq!(cmd.args.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
    /// Optional environment overrides
    pub env: Option<HashMap<OsString, OsString>>,
    /// Start from an empty environment instead of the caller's
    pub clear_env: bool,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Build a spec from a command vector whose first element is the program.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::EmptyCommand`] if `argv` is empty.
    ///
    /// ```rust
    /// use textproc_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::from_argv(["grep", "-n", "todo"]).unwrap();
    /// assert_eq!(cmd.args.len(), 2);
    /// assert!(CommandSpec::from_argv(Vec::<String>::new()).is_err());
    /// ```
    pub fn from_argv<I, S>(argv: I) -> Result<Self, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = argv.into_iter();
        let program = argv.next().ok_or(RunnerError::EmptyCommand)?;
        Ok(Self::new(program).args(argv))
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set one environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let env_map = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in envs {
            env_map.insert(key.into(), value.into());
        }
        self
    }

    /// Do not inherit the caller's environment. Overrides set with
    /// [`env`](Self::env) still apply.
    #[must_use]
    pub fn env_clear(mut self) -> Self {
        self.clear_env = true;
        self
    }

    /// Program name for messages and logs.
    #[must_use]
    pub fn display_program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    pub(crate) fn to_tokio_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        if self.clear_env {
            cmd.env_clear();
        }

        if let Some(ref env) = self.env {
            cmd.envs(env);
        }

        cmd
    }
}
