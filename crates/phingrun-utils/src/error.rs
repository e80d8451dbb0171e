use std::fmt;
use thiserror::Error;

pub use phingrun_runner::RunnerError;

use crate::exit_codes::ExitCode;

/// Library-level error type with rich context and user-friendly reporting.
///
/// | Category | Description |
/// |----------|-------------|
/// | `Config` | phingrun configuration file or CLI argument errors |
/// | `Invocation` | The request could not be turned into an engine command line |
/// | `Engine` | The external build engine could not be configured or run |
///
/// Use [`to_exit_code()`](Self::to_exit_code) to map errors to CLI exit codes and
/// [`display_for_user()`](Self::display_for_user) for end-user output.
///
/// Library code returns `PhingrunError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum PhingrunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invocation error: {0}")]
    Invocation(#[from] InvocationError),

    #[error("Build engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    BuildFile,
    BuildEngine,
    FileSystem,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::BuildFile => write!(f, "Build File"),
            Self::BuildEngine => write!(f, "Build Engine"),
            Self::FileSystem => write!(f, "File System"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile { path, reason } => {
                format!("Configuration file {path} has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile { .. } => Some(
                "Configuration files must be TOML with optional [project] and [engine] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, .. } => Some(format!(
                "The '{key}' option cannot be empty and must be within its documented range."
            )),
            Self::NotFound { .. } => {
                Some("A configuration file passed with --config must exist.".to_string())
            }
            Self::DiscoveryFailed { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile { .. } => vec![
                "Check the TOML syntax of .phingrun/config.toml".to_string(),
                "Run 'phingrun config' without the file to see the defaults".to_string(),
            ],
            Self::InvalidValue { key, .. } => match key.as_str() {
                "engine.timeout_secs" => vec![
                    "Use a whole number of seconds between 1 and 86400".to_string(),
                    "Remove the option to wait for the engine without a limit".to_string(),
                ],
                _ => vec![
                    format!("Set a non-empty value for '{key}'"),
                    "Remove the option to use the default value".to_string(),
                ],
            },
            Self::NotFound { .. } => vec![
                "Check the path given to --config".to_string(),
                "Omit --config to search for .phingrun/config.toml automatically".to_string(),
            ],
            Self::DiscoveryFailed { .. } => vec![
                "Check that the current directory still exists and is readable".to_string(),
                "Use --config <path> to specify the configuration file explicitly".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

/// Errors raised while turning a request into an engine command line.
///
/// These are raised before the engine is ever started.
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Unable to find file: {path}; Aborting.")]
    BuildFileNotFound { path: String },
}

impl UserFriendlyError for InvocationError {
    fn user_message(&self) -> String {
        match self {
            Self::BuildFileNotFound { .. } => self.to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::BuildFileNotFound { .. } => Some(
                "Without --file, the build file defaults to <root_dir>/build.xml.".to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BuildFileNotFound { .. } => vec![
                "Pass the build script explicitly with --file <path>".to_string(),
                "Set project.root_dir or --root-dir to the directory holding build.xml"
                    .to_string(),
                "Run 'phingrun config' to see the resolved root directory".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::BuildFile
    }
}

/// Errors from the external build engine boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine rejected or could not load its configuration.
    #[error("Engine configuration error: {reason}")]
    Configuration { reason: String },

    /// The engine failed in a way that does not fit any other category.
    #[error("Engine execution failed: {reason}")]
    Execution { reason: String },

    #[error(transparent)]
    Process(#[from] RunnerError),
}

impl UserFriendlyError for EngineError {
    fn user_message(&self) -> String {
        match self {
            Self::Configuration { reason } => {
                format!("Phing is not configured correctly: {reason}")
            }
            Self::Execution { reason } => format!("Phing execution failed: {reason}"),
            Self::Process(runner_err) => runner_err.user_message(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Configuration { .. } => Some(
                "The engine is found via engine.executable, engine.home/bin, or PATH.".to_string(),
            ),
            Self::Execution { .. } | Self::Process(_) => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Configuration { .. } => vec![
                "Install Phing and make sure 'phing' is on your PATH".to_string(),
                "Or point --phing-home / engine.home at the Phing installation".to_string(),
                "Or set --phing / engine.executable to the full path of the phing script"
                    .to_string(),
            ],
            Self::Execution { .. } => vec!["Re-run with -vv for engine diagnostics".to_string()],
            Self::Process(runner_err) => runner_err.suggestions(),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::BuildEngine
    }
}

impl UserFriendlyError for RunnerError {
    fn user_message(&self) -> String {
        match self {
            Self::SpawnFailed { program, reason } => {
                format!("Could not start '{program}': {reason}")
            }
            Self::NativeExecutionFailed { reason } => format!("Failed to run Phing: {reason}"),
            Self::Terminated => "Phing was terminated by a signal".to_string(),
            Self::Timeout { timeout_seconds } => {
                format!("Phing did not finish within {timeout_seconds} seconds")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Timeout { .. } => {
                Some("The engine timeout is set with --timeout or engine.timeout_secs.".to_string())
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SpawnFailed { .. } => vec![
                "Check that the phing script is executable".to_string(),
                "Check that PHP is installed for the phing launcher".to_string(),
            ],
            Self::Timeout { .. } => vec![
                "Increase the timeout with --timeout <secs>".to_string(),
                "Remove engine.timeout_secs to wait without a limit".to_string(),
            ],
            Self::NativeExecutionFailed { .. } | Self::Terminated => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::BuildEngine
    }
}

impl UserFriendlyError for PhingrunError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Invocation(err) => err.user_message(),
            Self::Engine(err) => err.user_message(),
            Self::Io(io_err) => format!("File system operation failed: {io_err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Invocation(err) => err.context(),
            Self::Engine(err) => err.context(),
            Self::Io(_) => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Invocation(err) => err.suggestions(),
            Self::Engine(err) => err.suggestions(),
            Self::Io(_) => vec!["Check file permissions in the project directory".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Invocation(err) => err.category(),
            Self::Engine(err) => err.category(),
            Self::Io(_) => ErrorCategory::FileSystem,
        }
    }
}

impl PhingrunError {
    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the appropriate CLI exit code.
    ///
    /// This is the single source of truth for exit codes:
    ///
    /// | Exit Code | Error |
    /// |-----------|-------|
    /// | -1 | `EngineError::Configuration` |
    /// | 2 | `ConfigError` |
    /// | 1 | everything else, including a missing build file |
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            PhingrunError::Engine(EngineError::Configuration { .. }) => {
                ExitCode::ENGINE_CONFIGURATION
            }
            PhingrunError::Config(_) => ExitCode::CLI_ARGS,
            _ => ExitCode::INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_configuration_maps_to_minus_one() {
        let err = PhingrunError::Engine(EngineError::Configuration {
            reason: "phing not found".to_string(),
        });
        assert_eq!(err.to_exit_code(), ExitCode::ENGINE_CONFIGURATION);
        assert_eq!(err.category(), ErrorCategory::BuildEngine);
    }

    #[test]
    fn test_other_failures_map_to_one() {
        let not_found = PhingrunError::from(InvocationError::BuildFileNotFound {
            path: "/srv/app/build.xml".to_string(),
        });
        assert_eq!(not_found.to_exit_code(), ExitCode::INTERNAL);

        let execution = PhingrunError::from(EngineError::Execution {
            reason: "boom".to_string(),
        });
        assert_eq!(execution.to_exit_code(), ExitCode::INTERNAL);

        let timeout = PhingrunError::from(EngineError::from(RunnerError::Timeout {
            timeout_seconds: 5,
        }));
        assert_eq!(timeout.to_exit_code(), ExitCode::INTERNAL);
    }

    #[test]
    fn test_config_error_maps_to_cli_args() {
        let err = PhingrunError::from(ConfigError::InvalidValue {
            key: "engine.executable".to_string(),
            value: "cannot be empty".to_string(),
        });
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
    }

    #[test]
    fn test_build_file_message_matches_original_wording() {
        let err = InvocationError::BuildFileNotFound {
            path: "/srv/app/build.xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to find file: /srv/app/build.xml; Aborting."
        );
    }

    #[test]
    fn test_display_for_user_includes_suggestions() {
        let err = PhingrunError::from(InvocationError::BuildFileNotFound {
            path: "build.xml".to_string(),
        });
        let message = err.display_for_user();
        assert!(message.starts_with("Error: Unable to find file: build.xml; Aborting."));
        assert!(message.contains("Context:"));
        assert!(message.contains("Suggestions:"));
        assert!(message.contains("--file"));
    }
}
