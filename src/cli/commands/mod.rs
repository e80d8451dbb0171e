//! CLI command implementations.
//!
//! Every handler returns `anyhow::Result<ExitCode>`; typed errors travel inside
//! the `anyhow::Error` and are recovered by `run.rs` for reporting.

mod config;
mod run;

pub use config::execute_config_command;
pub use run::{RunArgs, execute_run_command};
