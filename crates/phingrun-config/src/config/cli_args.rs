use std::path::PathBuf;

/// Configuration overrides taken from the command line.
///
/// Every field is optional; `None` leaves the lower-precedence value in place.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file (`--config`); disables upward discovery
    pub config_path: Option<PathBuf>,
    pub root_dir: Option<PathBuf>,
    pub phing_home: Option<PathBuf>,
    pub phing_classpath: Option<PathBuf>,
    pub phing: Option<String>,
    pub timeout_secs: Option<u64>,
}
