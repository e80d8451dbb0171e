use std::path::{Path, PathBuf};

use phingrun_config::EngineConfig;
use phingrun_runner::{CommandSpec, NativeRunner, OutputMode, ProcessRunner, RunnerError};
use phingrun_utils::error::EngineError;

/// Environment variable naming the Phing installation for the engine
pub const PHING_HOME_ENV: &str = "PHING_HOME";

/// Environment variable carrying the PHP classpath for the engine
pub const PHP_CLASSPATH_ENV: &str = "PHP_CLASSPATH";

/// Result of one completed engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOutcome {
    pub exit_code: i32,
}

impl EngineOutcome {
    #[must_use]
    pub const fn success(self) -> bool {
        self.exit_code == 0
    }
}

/// Lifecycle of the external build engine.
///
/// `start` must precede `run`; `stop` may be called any number of times.
pub trait BuildEngineClient {
    /// Locate and prepare the engine.
    ///
    /// # Errors
    ///
    /// `EngineError::Configuration` when the engine cannot be located or its
    /// home is unusable.
    fn start(&mut self) -> Result<(), EngineError>;

    /// Run the engine with the given argument tokens.
    fn run(&mut self, args: &[String]) -> Result<EngineOutcome, EngineError>;

    /// Release whatever `start` prepared.
    fn stop(&mut self) -> Result<(), EngineError>;
}

impl<C: BuildEngineClient + ?Sized> BuildEngineClient for &mut C {
    fn start(&mut self) -> Result<(), EngineError> {
        (**self).start()
    }

    fn run(&mut self, args: &[String]) -> Result<EngineOutcome, EngineError> {
        (**self).run(args)
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        (**self).stop()
    }
}

/// [`BuildEngineClient`] that runs Phing as a child process.
///
/// The engine shares the caller's terminal. Its home and classpath reach it
/// through `PHING_HOME` and `PHP_CLASSPATH`.
#[derive(Debug)]
pub struct PhingProcessClient<R: ProcessRunner = NativeRunner> {
    settings: EngineConfig,
    runner: R,
    prepared: Option<CommandSpec>,
}

impl PhingProcessClient<NativeRunner> {
    #[must_use]
    pub fn new(settings: EngineConfig) -> Self {
        Self::with_runner(settings, NativeRunner::new())
    }
}

impl<R: ProcessRunner> PhingProcessClient<R> {
    #[must_use]
    pub fn with_runner(settings: EngineConfig, runner: R) -> Self {
        Self {
            settings,
            runner,
            prepared: None,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.prepared.is_some()
    }

    /// Resolved engine executable, once started.
    #[must_use]
    pub fn executable(&self) -> Option<&Path> {
        self.prepared
            .as_ref()
            .map(|spec| Path::new(spec.program.as_os_str()))
    }

    /// Find the engine executable.
    ///
    /// A value with a directory component is taken as a path. A bare name is
    /// looked up in `<home>/bin` when a home is configured, otherwise on `PATH`.
    fn resolve_executable(&self) -> Result<PathBuf, EngineError> {
        let name = self.settings.executable.as_str();
        let as_path = Path::new(name);

        if as_path.is_absolute() || as_path.components().count() > 1 {
            return if as_path.is_file() {
                Ok(as_path.to_path_buf())
            } else {
                Err(EngineError::Configuration {
                    reason: format!("Phing executable not found at {name}"),
                })
            };
        }

        match &self.settings.home {
            Some(home) => {
                let bin_dir = home.join("bin");
                which::which_in(name, Some(&bin_dir), home).map_err(|e| {
                    EngineError::Configuration {
                        reason: format!("'{name}' not found in {}: {e}", bin_dir.display()),
                    }
                })
            }
            None => which::which(name).map_err(|e| EngineError::Configuration {
                reason: format!("'{name}' not found on PATH: {e}"),
            }),
        }
    }
}

impl<R: ProcessRunner> BuildEngineClient for PhingProcessClient<R> {
    fn start(&mut self) -> Result<(), EngineError> {
        if let Some(home) = &self.settings.home
            && !home.is_dir()
        {
            return Err(EngineError::Configuration {
                reason: format!("Phing home {} is not a directory", home.display()),
            });
        }

        let executable = self.resolve_executable()?;
        tracing::debug!(executable = %executable.display(), "Resolved Phing executable");

        let mut spec = CommandSpec::new(executable).output(OutputMode::Inherit);
        if let Some(home) = &self.settings.home {
            spec = spec.env(PHING_HOME_ENV, home);
        }
        if let Some(classpath) = self.settings.effective_classpath() {
            spec = spec.env(PHP_CLASSPATH_ENV, classpath);
        }

        self.prepared = Some(spec);
        Ok(())
    }

    fn run(&mut self, args: &[String]) -> Result<EngineOutcome, EngineError> {
        let Some(prepared) = &self.prepared else {
            return Err(EngineError::Execution {
                reason: "engine was not started".to_string(),
            });
        };

        let cmd = prepared.clone().args(args);
        tracing::info!(command = %cmd.display_line(), "Running Phing");

        let output = self.runner.run(&cmd, self.settings.timeout())?;
        match output.exit_code {
            Some(exit_code) => Ok(EngineOutcome { exit_code }),
            None => Err(EngineError::Process(RunnerError::Terminated)),
        }
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.prepared = None;
        Ok(())
    }
}
