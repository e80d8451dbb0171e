//! phingrun - run Phing build scripts from the command line
//!
//! phingrun turns a small set of options (build file, debug flag, properties,
//! targets and console verbosity) into a Phing command line, resolves where
//! Phing lives, runs it, and hands its exit code back to the shell.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Run the default target of ./build.xml
//! phingrun run
//!
//! # Run two targets with properties and engine debug output
//! phingrun run --target build,test -D env=prod,region=eu --debug
//!
//! # Show the command line without running Phing
//! phingrun -v run --dry-run
//!
//! # Show the effective configuration and where each value came from
//! phingrun config --json
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use phingrun::{Config, InvocationRequest, PhingProcessClient, RunOptions, run_invocation};
//!
//! let config = Config::builder().root_dir("/srv/app").build()?;
//!
//! let mut request = InvocationRequest::from_config(&config);
//! request.target_list = Some("deploy".to_string());
//!
//! let mut client = PhingProcessClient::new(config.engine.clone());
//! let outcome = run_invocation(&mut client, &request, RunOptions::default())?;
//! std::process::exit(outcome.exit_code().as_i32());
//! # Ok::<(), phingrun::PhingrunError>(())
//! ```
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | engine's own | Phing ran to completion |
//! | -1 | Phing could not be located or configured |
//! | 1 | Build file missing, engine crashed or timed out |
//! | 2 | Invalid arguments or phingrun configuration |

pub mod cli;
pub mod error_reporter;

pub use phingrun_config::{CliArgs, Config, ConfigBuilder, ConfigSource};
pub use phingrun_engine::{
    BuildEngineClient, EngineOutcome, InvocationOutcome, InvocationRequest, PhingProcessClient,
    RunOptions, assemble_arguments, build_arguments, run_invocation, run_invocation_with,
};
pub use phingrun_runner::{CommandSpec, NativeRunner, ProcessRunner};
pub use phingrun_utils::error::{
    ConfigError, EngineError, InvocationError, PhingrunError, UserFriendlyError,
};
pub use phingrun_utils::exit_codes::ExitCode;
pub use phingrun_utils::types::Verbosity;

/// The argument builder operations, re-exported under their own path.
pub mod argument_builder {
    pub use phingrun_engine::argument_builder::*;
}
