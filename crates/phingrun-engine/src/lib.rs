//! Turning a run request into a Phing command line, and driving the engine
//!
//! - [`argument_builder`]: pure translation of an [`InvocationRequest`] into engine tokens
//! - [`client`]: the [`BuildEngineClient`] lifecycle and its process-backed implementation
//! - [`session`]: one complete start/run/stop cycle

pub mod argument_builder;
pub mod client;
pub mod invocation;
pub mod session;

pub use argument_builder::{assemble_arguments, build_arguments};
pub use client::{BuildEngineClient, EngineOutcome, PhingProcessClient};
pub use invocation::InvocationRequest;
pub use session::{InvocationOutcome, RunOptions, run_invocation, run_invocation_with};
