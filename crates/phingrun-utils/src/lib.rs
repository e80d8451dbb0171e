//! Shared building blocks for phingrun: error taxonomy, exit codes, logging setup
//! and small value types used across the workspace.

pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod types;
