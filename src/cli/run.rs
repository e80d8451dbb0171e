//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Initializes logging
//! - Builds CliArgs and discovers Config
//! - Dispatches to command handlers
//! - Handles all error output

use clap::Parser;

use super::args::{Cli, Commands};
use super::commands::{self, RunArgs};

use crate::error_reporter::create_contextual_report;
use crate::{CliArgs, Config, ExitCode, PhingrunError, Verbosity};

/// Main CLI execution function.
///
/// This function handles ALL output including errors. It returns `Result<(), ExitCode>`:
/// - `Ok(())` when the command succeeded
/// - `Err(ExitCode)` otherwise, after any error report has been printed
///
/// main.rs only calls `std::process::exit(code.as_i32())` on error - it does NOT print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    if let Err(e) = phingrun_utils::logging::init_tracing(verbosity) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        root_dir: cli.root_dir.clone(),
        phing_home: cli.phing_home.clone(),
        phing_classpath: cli.phing_classpath.clone(),
        phing: cli.phing.clone(),
        timeout_secs: cli.timeout,
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = PhingrunError::from(err);
            eprintln!("{}", create_contextual_report(&err, "config"));
            return Err(err.to_exit_code());
        }
    };

    let operation = match &cli.command {
        Commands::Run { .. } => "run",
        Commands::Config { .. } => "config",
    };

    let result = match cli.command {
        Commands::Run {
            file,
            debug,
            property,
            target,
            dry_run,
        } => commands::execute_run_command(
            &config,
            RunArgs {
                file,
                debug,
                property,
                target,
                dry_run,
            },
            verbosity,
        ),
        Commands::Config { json } => commands::execute_config_command(&config, json),
    };

    match result {
        Ok(code) if code.is_success() => Ok(()),
        Ok(code) => Err(code),
        Err(error) => {
            if let Some(phingrun_error) = error.downcast_ref::<PhingrunError>() {
                eprintln!("{}", create_contextual_report(phingrun_error, operation));
                Err(phingrun_error.to_exit_code())
            } else {
                eprintln!("✗ Unexpected error: {error:#}");
                eprintln!("\n  Run with -vv for more detailed output");
                Err(ExitCode::INTERNAL)
            }
        }
    }
}
