use crate::error::RunnerError;
use std::time::Duration;

use super::CommandSpec;

// ============================================================================
// ProcessRunner Trait - Process Execution Interface
// ============================================================================

/// Output from a process execution.
///
/// With [`OutputMode::Inherit`](crate::OutputMode::Inherit) the streams went
/// straight to the terminal and `stdout`/`stderr` are empty.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Standard output from the process
    pub stdout: Vec<u8>,
    /// Standard error from the process
    pub stderr: Vec<u8>,
    /// Exit code from the process (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Create a new `ProcessOutput` with the given values.
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Output for a process that exited with `code` and printed nothing we kept.
    #[must_use]
    pub fn exited(code: i32) -> Self {
        Self::new(Vec::new(), Vec::new(), Some(code))
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for process execution.
///
/// Implementations MUST use argv-style APIs only (no shell string evaluation).
/// The interface is synchronous; a `None` timeout waits for the child to exit.
///
/// # Example
///
/// ```rust
/// use phingrun_runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
/// use std::time::Duration;
///
/// struct EchoArgs;
///
/// impl ProcessRunner for EchoArgs {
///     fn run(&self, cmd: &CommandSpec, _timeout: Option<Duration>) -> Result<ProcessOutput, RunnerError> {
///         let joined = cmd.args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" ");
///         Ok(ProcessOutput::new(joined.into_bytes(), Vec::new(), Some(0)))
///     }
/// }
///
/// let out = EchoArgs.run(&CommandSpec::new("phing").arg("deploy"), None).unwrap();
/// assert_eq!(out.stdout_string(), "deploy");
/// ```
pub trait ProcessRunner {
    /// Execute a command, optionally bounded by `timeout`.
    ///
    /// * `Ok(ProcessOutput)` - the process completed (possibly with non-zero exit code)
    /// * `Err(RunnerError::Timeout)` - the process was killed after `timeout`
    /// * `Err(RunnerError::*)` - spawn or wait failures
    fn run(
        &self,
        cmd: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, RunnerError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(
        &self,
        cmd: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, RunnerError> {
        (**self).run(cmd, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_output_success() {
        assert!(ProcessOutput::exited(0).success());
        assert!(!ProcessOutput::exited(1).success());
        assert!(!ProcessOutput::exited(255).success());

        // Killed by signal
        let killed = ProcessOutput::new(Vec::new(), Vec::new(), None);
        assert!(!killed.success());
    }

    #[test]
    fn test_process_output_lossy_utf8() {
        let invalid_utf8 = vec![0xff, 0xfe, 0x00, 0x01];
        let output = ProcessOutput::new(invalid_utf8, Vec::new(), Some(0));

        assert!(!output.stdout_string().is_empty());
    }

    /// A mock runner that simulates a timeout
    struct TimeoutRunner;

    impl ProcessRunner for TimeoutRunner {
        fn run(
            &self,
            _cmd: &CommandSpec,
            timeout: Option<Duration>,
        ) -> Result<ProcessOutput, RunnerError> {
            Err(RunnerError::Timeout {
                timeout_seconds: timeout.map_or(0, |t| t.as_secs()),
            })
        }
    }

    #[test]
    fn test_process_runner_through_reference() {
        let runner = TimeoutRunner;
        let by_ref: &dyn ProcessRunner = &runner;
        let result = by_ref.run(&CommandSpec::new("phing"), Some(Duration::from_secs(60)));

        match result {
            Err(RunnerError::Timeout { timeout_seconds }) => assert_eq!(timeout_seconds, 60),
            other => panic!("Expected Timeout error, got {other:?}"),
        }
    }
}
