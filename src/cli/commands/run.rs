//! Run command implementation
//!
//! Handles `phingrun run`.

use anyhow::Result;

use crate::argument_builder::{PROPERTY_PREFIX, resolve_properties};
use crate::{
    Config, ExitCode, InvocationRequest, PhingProcessClient, RunOptions, Verbosity,
    run_invocation_with,
};

/// Options of the `run` subcommand
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub file: Option<String>,
    pub debug: bool,
    pub property: Option<String>,
    pub target: Option<String>,
    pub dry_run: bool,
}

/// Build the request for a `run` invocation.
fn build_request(config: &Config, args: RunArgs, verbosity: Verbosity) -> InvocationRequest {
    InvocationRequest {
        build_file: args.file,
        debug: args.debug,
        property_list: args.property,
        target_list: args.target,
        verbosity,
        ..InvocationRequest::from_config(config)
    }
}

/// Log each user property; the injected `basedir` is not one of them.
fn log_properties(request: &InvocationRequest) {
    for token in resolve_properties(request.property_list.as_deref()) {
        let property = token.strip_prefix(PROPERTY_PREFIX).unwrap_or(&token);
        tracing::info!(property = %property, "Adding property");
    }
}

/// Execute the run command
///
/// Returns Phing's exit code, or success for a dry run.
pub fn execute_run_command(
    config: &Config,
    args: RunArgs,
    verbosity: Verbosity,
) -> Result<ExitCode> {
    let dry_run = args.dry_run;
    let request = build_request(config, args, verbosity);

    if verbosity == Verbosity::Normal && request.uses_default_build_file() {
        eprintln!(
            "No build file specified, setting file to: {}",
            request.default_file
        );
    }

    let executable = config.engine.executable.as_str();
    let mut client = PhingProcessClient::new(config.engine.clone());

    let outcome = run_invocation_with(&mut client, &request, RunOptions { dry_run }, |arguments| {
        log_properties(&request);

        let command_line = format!("{executable} {}", arguments.join(" "));
        if dry_run {
            println!("{command_line}");
        } else if verbosity.is_verbose() {
            eprintln!("Executing Phing with: {command_line}");
        }
    })?;

    Ok(outcome.exit_code())
}
