//! Logging setup
//!
//! Library code only emits `tracing` events; applications opt in to output
//! by calling [`init_tracing`] or [`init_from_config`] once at startup.

use std::io::IsTerminal;
use textproc_config::LoggingConfig;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "textproc=info,warn";
const VERBOSE_FILTER: &str = "textproc=debug,info";

/// Colour only when stdout is a terminal and `NO_COLOR` is unset.
fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Install a global subscriber with a compact format.
///
/// `RUST_LOG` takes precedence over the built-in filter. Verbose mode lowers
/// the default level to `debug` and adds event targets and span-close
/// events.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    install(verbose, None)
}

/// Install a global subscriber from the `[logging]` section.
///
/// An explicit `filter` directive wins over `RUST_LOG`.
///
/// # Errors
///
/// Fails if the directive does not parse or a global subscriber is already
/// installed.
pub fn init_from_config(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    install(config.verbose.unwrap_or(false), config.filter.as_deref())
}

fn install(
    verbose: bool,
    directive: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let layer = fmt::layer()
        .with_ansi(use_color())
        .with_target(verbose)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_span_events(if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE })
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;

    Ok(())
}
