use std::collections::BTreeMap;
use std::ffi::OsString;
use std::process::Command;

// ============================================================================
// CommandSpec - Argv-style Process Execution Specification
// ============================================================================

/// Where the child's standard streams go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// stdout/stderr are piped and returned in [`ProcessOutput`](crate::ProcessOutput);
    /// stdin is closed.
    #[default]
    Capture,
    /// The child shares the caller's terminal (stdin, stdout, stderr).
    Inherit,
}

/// Specification for a command to execute.
///
/// Arguments are `Vec<OsString>`, never shell strings. No `sh -c` / `cmd /C`
/// evaluation happens anywhere, so `-Dname=$(whoami)` reaches the engine verbatim.
///
/// # Example
///
/// ```rust
/// use phingrun_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("phing")
///     .arg("-f")
///     .arg("/srv/app/build.xml")
///     .env("PHING_HOME", "/opt/phing");
///
/// assert_eq!(cmd.program, OsString::from("phing"));
/// assert_eq!(cmd.args.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Optional environment overrides
    pub env: Option<BTreeMap<OsString, OsString>>,
    /// Stream handling for the child
    pub output: OutputMode,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    ///
    /// ```rust
    /// use phingrun_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::new("phing").args(["-debug", "deploy"]);
    /// assert_eq!(cmd.args.len(), 2);
    /// ```
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the command.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Choose how the child's streams are wired.
    #[must_use]
    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    /// Render the command line for display. Not a shell-safe quoting; only
    /// used for diagnostics.
    #[must_use]
    pub fn display_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Convert this `CommandSpec` into a `std::process::Command`.
    ///
    /// Stream wiring is left to the runner.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref env) = self.env {
            for (key, value) in env {
                cmd.env(key, value);
            }
        }

        cmd
    }
}
