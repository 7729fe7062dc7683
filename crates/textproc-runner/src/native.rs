use crate::error::{Channel, RunnerError};
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Child;
use tracing::{debug, info, warn};

use super::{CommandSpec, ExecutionResult, ProcessRunner};

// ============================================================================
// NativeRunner - spawn with piped stdio and drain concurrently
// ============================================================================

/// Runs commands directly with `tokio::process`, driven by a private
/// current-thread runtime so callers see a blocking API.
///
/// Writing stdin, reading stdout and reading stderr proceed concurrently, so
/// a child that fills one pipe while the runner is busy with another cannot
/// deadlock against it. The child is reaped on every path that started it.
///
/// `run` must not be called from inside an async runtime; it blocks the
/// calling thread until the child exits.
///
/// # Example
///
/// ```rust,no_run
/// use textproc_runner::{CommandSpec, NativeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = NativeRunner::with_timeout(Duration::from_secs(5));
/// let result = runner.run(&CommandSpec::new("cat"), b"hello").unwrap();
/// assert_eq!(result.stdout, b"hello");
/// assert!(result.success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner {
    timeout: Option<Duration>,
}

impl NativeRunner {
    /// A runner without a deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// A runner that kills the child once `timeout` has elapsed.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn execute(
        &self,
        cmd: &CommandSpec,
        input: &[u8],
    ) -> Result<ExecutionResult, RunnerError> {
        let program = cmd.display_program();

        let mut command = cmd.to_tokio_command();
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            program = %program,
            argc = cmd.args.len(),
            input_bytes = input.len(),
            "Spawning process"
        );
        let started = Instant::now();

        let mut child = command.spawn().map_err(|source| RunnerError::Spawn {
            program: program.clone(),
            source,
        })?;

        let outcome = match self.timeout {
            Some(limit) => {
                tokio::time::timeout(limit, exchange(&mut child, input, &program)).await
            }
            None => Ok(exchange(&mut child, input, &program).await),
        };

        let Ok(outcome) = outcome else {
            let timeout_ms = self.timeout.unwrap_or_default().as_millis();
            warn!(
                program = %program,
                timeout_ms = %timeout_ms,
                "Process exceeded deadline, killing"
            );
            reap(&mut child, &program).await;
            return Err(RunnerError::Timeout { timeout_ms });
        };

        let (status, stdout, stderr) = outcome.inspect_err(|err| {
            debug!(program = %program, error = %err, "Process I/O failed");
        })?;

        let exit_code = exit_code_of(status);
        info!(
            program = %program,
            exit_code = exit_code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            duration_ms = %started.elapsed().as_millis(),
            "Process completed"
        );

        Ok(ExecutionResult::new(exit_code, stdout, stderr))
    }
}

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, input: &[u8]) -> Result<ExecutionResult, RunnerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| RunnerError::Spawn {
                program: cmd.display_program(),
                source,
            })?;

        runtime.block_on(self.execute(cmd, input))
    }
}

/// Feed stdin and drain both output streams, then wait for exit.
///
/// On an I/O failure the child is killed and reaped before the error is
/// returned.
async fn exchange(
    child: &mut Child,
    input: &[u8],
    program: &str,
) -> Result<(ExitStatus, Vec<u8>, Vec<u8>), RunnerError> {
    let pumped = pump(
        child.stdin.take(),
        child.stdout.take(),
        child.stderr.take(),
        input,
    )
    .await;

    let (stdout, stderr) = match pumped {
        Ok(captured) => captured,
        Err(err) => {
            reap(child, program).await;
            return Err(err);
        }
    };

    let status = child.wait().await.map_err(RunnerError::io(Channel::Wait))?;
    Ok((status, stdout, stderr))
}

/// Write `input` and read both outputs concurrently until all three
/// channels are done.
async fn pump<W, O, E>(
    stdin: Option<W>,
    stdout: Option<O>,
    stderr: Option<E>,
    input: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), RunnerError>
where
    W: AsyncWrite + Unpin,
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let (written, stdout, stderr) = tokio::join!(
        write_input(stdin, input),
        drain(stdout, Channel::Stdout),
        drain(stderr, Channel::Stderr),
    );

    match (written, stdout, stderr) {
        (Ok(()), Ok(stdout), Ok(stderr)) => Ok((stdout, stderr)),
        (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => Err(err),
    }
}

async fn write_input<W>(stdin: Option<W>, input: &[u8]) -> Result<(), RunnerError>
where
    W: AsyncWrite + Unpin,
{
    let Some(mut stdin) = stdin else {
        return Ok(());
    };

    match stdin.write_all(input).await {
        Ok(()) => {}
        // The child exited or closed its end without reading everything.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!(input_bytes = input.len(), "Child closed stdin early");
        }
        Err(source) => {
            return Err(RunnerError::Io {
                channel: Channel::Stdin,
                source,
            });
        }
    }

    // Dropping the handle closes the pipe: end of input for the child
    drop(stdin);
    Ok(())
}

async fn drain<R>(pipe: Option<R>, channel: Channel) -> Result<Vec<u8>, RunnerError>
where
    R: AsyncRead + Unpin,
{
    let mut captured = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut captured)
            .await
            .map_err(RunnerError::io(channel))?;
    }
    Ok(captured)
}

/// Kill the child if it is still running and wait for it.
async fn reap(child: &mut Child, program: &str) {
    if let Ok(Some(_)) = child.try_wait() {
        return;
    }
    if let Err(err) = child.kill().await {
        warn!(program = %program, error = %err, "Failed to reap child process");
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
