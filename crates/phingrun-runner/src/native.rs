use crate::error::RunnerError;
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::{CommandSpec, OutputMode, ProcessOutput, ProcessRunner};

// ============================================================================
// NativeRunner - Native Process Execution
// ============================================================================

/// Native process runner using `std::process::Command`.
///
/// Uses `Command::new().args()` only; shell metacharacters in arguments are
/// never interpreted. The child is awaited on a helper thread so that a timeout
/// can kill it without exposing async in the public API.
///
/// On Unix a child started with a timeout gets its own process group, and the
/// timeout kills the whole group. While it runs, SIGINT, SIGTERM and SIGHUP
/// received by this process are relayed to that group.
///
/// # Example
///
/// ```rust,no_run
/// use phingrun_runner::{CommandSpec, NativeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = NativeRunner::new();
/// let cmd = CommandSpec::new("phing").arg("-version");
///
/// let output = runner.run(&cmd, Some(Duration::from_secs(30))).unwrap();
/// assert!(output.success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NativeRunner {
    fn run(
        &self,
        cmd: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, RunnerError> {
        let mut command = cmd.to_command();
        match cmd.output {
            OutputMode::Capture => {
                command
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
            OutputMode::Inherit => {
                command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
        }

        let isolate = timeout.is_some();

        #[cfg(unix)]
        let relay = isolate.then(|| {
            use std::os::unix::process::CommandExt;

            command.process_group(0);
            relay::SignalRelay::install()
        });

        let child = command.spawn().map_err(|e| RunnerError::SpawnFailed {
            program: cmd.program.to_string_lossy().into_owned(),
            reason: e.to_string(),
        })?;

        let child_id = child.id();
        tracing::debug!(pid = child_id, command = %cmd.display_line(), "Spawned process");

        #[cfg(unix)]
        {
            if let Some(relay) = &relay {
                relay.track(child_id);
            }
        }

        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        let received = match timeout {
            Some(limit) => rx.recv_timeout(limit),
            None => rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(output_result) => {
                let _ = handle.join();

                let output = output_result.map_err(|e| RunnerError::NativeExecutionFailed {
                    reason: format!("Failed to wait for process: {e}"),
                })?;

                Ok(ProcessOutput::new(output.stdout, output.stderr, output.status.code()))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Self::terminate_process(child_id, isolate);
                let _ = handle.join();

                Err(RunnerError::Timeout {
                    timeout_seconds: timeout.map_or(0, |t| t.as_secs()),
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::NativeExecutionFailed {
                reason: "Process monitoring thread terminated unexpectedly".to_string(),
            }),
        }
    }
}

impl NativeRunner {
    /// Terminate a process by its PID.
    ///
    /// On Unix, sends SIGKILL to the process, or to its whole process group
    /// when it was started in one of its own.
    /// On Windows, uses TerminateProcess.
    fn terminate_process(pid: u32, group: bool) {
        tracing::warn!(pid, group, "Killing process after timeout");

        #[cfg(unix)]
        {
            let target = if group { -(pid as i32) } else { pid as i32 };
            // SAFETY: kill(2) has no memory-safety preconditions; a stale pid only yields ESRCH.
            unsafe {
                libc::kill(target, libc::SIGKILL);
            }
        }

        #[cfg(windows)]
        {
            use windows::Win32::Foundation::CloseHandle;
            use windows::Win32::System::Threading::{
                OpenProcess, PROCESS_TERMINATE, TerminateProcess,
            };

            unsafe {
                if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                    let _ = TerminateProcess(handle, 1);
                    let _ = CloseHandle(handle);
                }
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = (pid, group);
        }
    }
}

#[cfg(unix)]
mod relay {
    use std::sync::atomic::{AtomicI32, Ordering};

    /// Process group receiving relayed signals; 0 while none is tracked.
    static CHILD_GROUP: AtomicI32 = AtomicI32::new(0);

    const RELAYED: [libc::c_int; 3] = [libc::SIGINT, libc::SIGTERM, libc::SIGHUP];

    extern "C" fn relay_signal(signal: libc::c_int) {
        let group = CHILD_GROUP.load(Ordering::SeqCst);
        if group > 0 {
            // SAFETY: kill(2) is async-signal-safe.
            unsafe {
                libc::kill(-group, signal);
            }
        }
    }

    /// Relays terminal signals to an isolated child's process group until dropped.
    pub(super) struct SignalRelay {
        previous: [libc::sighandler_t; 3],
    }

    impl SignalRelay {
        pub(super) fn install() -> Self {
            let handler = relay_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            // SAFETY: the handler only reads an atomic and calls kill(2).
            let previous = RELAYED.map(|signal| unsafe { libc::signal(signal, handler) });
            Self { previous }
        }

        pub(super) fn track(&self, pid: u32) {
            CHILD_GROUP.store(pid as i32, Ordering::SeqCst);
        }
    }

    impl Drop for SignalRelay {
        fn drop(&mut self) {
            CHILD_GROUP.store(0, Ordering::SeqCst);
            for (signal, previous) in RELAYED.into_iter().zip(self.previous) {
                // SAFETY: restores the disposition saved by `install`.
                unsafe {
                    libc::signal(signal, previous);
                }
            }
        }
    }
}
