use phingrun_config::{Config, DEFAULT_BUILD_FILE};
use phingrun_utils::types::Verbosity;

/// A single request to run the engine.
///
/// Built fresh for every invocation from the `run` options and the effective
/// configuration, consumed once by [`build_arguments`](crate::build_arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Requested build file; empty is treated like absent
    pub build_file: Option<String>,
    pub debug: bool,
    /// Comma-separated `key=value` pairs
    pub property_list: Option<String>,
    /// Comma-separated target names
    pub target_list: Option<String>,
    pub verbosity: Verbosity,
    /// Always injected as the `basedir` property
    pub root_directory: String,
    /// Joined onto `root_directory` when no build file is requested
    pub default_file: String,
}

impl InvocationRequest {
    /// Request with no options set, rooted at `root_directory`.
    #[must_use]
    pub fn new(root_directory: impl Into<String>) -> Self {
        Self {
            build_file: None,
            debug: false,
            property_list: None,
            target_list: None,
            verbosity: Verbosity::Normal,
            root_directory: root_directory.into(),
            default_file: DEFAULT_BUILD_FILE.to_string(),
        }
    }

    /// Request rooted at the configured project directory and default build file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_file: config.project.default_file.clone(),
            ..Self::new(config.root_dir().to_string_lossy())
        }
    }

    /// Whether the default build file will be used.
    #[must_use]
    pub fn uses_default_build_file(&self) -> bool {
        self.build_file.as_deref().is_none_or(str::is_empty)
    }
}
