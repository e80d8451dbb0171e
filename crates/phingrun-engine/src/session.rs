use std::time::Instant;

use phingrun_utils::error::PhingrunError;
use phingrun_utils::exit_codes::ExitCode;
use phingrun_utils::logging::{invocation_span, log_engine_complete};

use crate::argument_builder::{assemble_arguments, resolve_build_file, resolve_targets};
use crate::client::BuildEngineClient;
use crate::invocation::InvocationRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Build the arguments but never touch the engine
    pub dry_run: bool,
}

/// What one invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    /// Tokens handed (or, in a dry run, that would be handed) to the engine
    pub arguments: Vec<String>,
    /// Engine exit code; `None` when the engine was not run
    pub engine_exit_code: Option<i32>,
}

impl InvocationOutcome {
    /// Process exit code for this outcome. A dry run counts as success.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        self.engine_exit_code
            .map_or(ExitCode::SUCCESS, ExitCode::from_i32)
    }
}

/// Run one request through the engine: build arguments, then start, run, stop.
///
/// See [`run_invocation_with`].
pub fn run_invocation<C>(
    client: &mut C,
    request: &InvocationRequest,
    options: RunOptions,
) -> Result<InvocationOutcome, PhingrunError>
where
    C: BuildEngineClient + ?Sized,
{
    run_invocation_with(client, request, options, |_| {})
}

/// Like [`run_invocation`], calling `on_arguments` once the argument list is known
/// and before the engine is started.
///
/// A missing build file fails before the client is touched. `stop` runs even
/// when `run` fails, and the `run` error is the one returned.
///
/// # Errors
///
/// `InvocationError` for a missing build file, `EngineError` for anything the
/// client reports.
pub fn run_invocation_with<C, F>(
    client: &mut C,
    request: &InvocationRequest,
    options: RunOptions,
    on_arguments: F,
) -> Result<InvocationOutcome, PhingrunError>
where
    C: BuildEngineClient + ?Sized,
    F: FnOnce(&[String]),
{
    let build_file = resolve_build_file(
        request.build_file.as_deref(),
        &request.root_directory,
        &request.default_file,
    )?;
    let arguments = assemble_arguments(&build_file, request);

    let span = invocation_span(
        &build_file.to_string_lossy(),
        resolve_targets(request.target_list.as_deref()).len(),
    );
    let _guard = span.enter();

    on_arguments(&arguments);

    if options.dry_run {
        tracing::debug!("Dry run, engine not started");
        return Ok(InvocationOutcome {
            arguments,
            engine_exit_code: None,
        });
    }

    client.start()?;

    let started = Instant::now();
    let result = client.run(&arguments);
    let stopped = client.stop();

    let outcome = result?;
    stopped?;

    log_engine_complete(outcome.exit_code, started.elapsed().as_millis());

    Ok(InvocationOutcome {
        arguments,
        engine_exit_code: Some(outcome.exit_code),
    })
}
