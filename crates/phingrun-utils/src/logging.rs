//! Logging infrastructure for phingrun
//!
//! Diagnostics go to stderr through `tracing`. The engine owns stdout, so nothing
//! in here ever writes there.

use std::io::IsTerminal;
use tracing::{Level, info, span};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::types::Verbosity;

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Filter directive used when `RUST_LOG` is not set.
#[must_use]
pub const fn default_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose(1) => "phingrun=info,warn",
        Verbosity::Verbose(_) => "phingrun=debug,info",
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from `verbosity`. With two
/// or more `-v` flags the target and span close events are included.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init_tracing(verbosity: Verbosity) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let detailed = matches!(verbosity, Verbosity::Verbose(level) if level > 1);

    if detailed {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_color())
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_color())
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .without_time()
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Span covering one engine invocation.
pub fn invocation_span(build_file: &str, target_count: usize) -> tracing::Span {
    span!(
        Level::INFO,
        "phing_invocation",
        build_file = %build_file,
        targets = target_count,
    )
}

/// Log engine completion with its exit code and wall time.
pub fn log_engine_complete(exit_code: i32, duration_ms: u128) {
    info!(exit_code, duration_ms = %duration_ms, "Phing finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_per_verbosity() {
        assert_eq!(default_filter(Verbosity::Quiet), "error");
        assert_eq!(default_filter(Verbosity::Normal), "warn");
        assert_eq!(default_filter(Verbosity::Verbose(1)), "phingrun=info,warn");
        assert_eq!(default_filter(Verbosity::Verbose(2)), "phingrun=debug,info");
        assert_eq!(default_filter(Verbosity::Verbose(7)), "phingrun=debug,info");
    }

    #[test]
    fn test_default_filters_parse() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose(1),
            Verbosity::Verbose(3),
        ] {
            assert!(EnvFilter::try_new(default_filter(verbosity)).is_ok());
        }
    }

    #[test]
    fn test_invocation_span_without_subscriber() {
        let span = invocation_span("/srv/app/build.xml", 2);
        let _guard = span.enter();
        log_engine_complete(0, 12);
    }
}
