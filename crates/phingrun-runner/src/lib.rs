//! Process execution for the external build engine
//!
//! # Security Model
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style invocation.
//! Build properties and target names are user input; they are passed to the engine
//! as discrete elements rather than shell strings, so no shell ever interprets them.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::{CommandSpec, OutputMode};
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
