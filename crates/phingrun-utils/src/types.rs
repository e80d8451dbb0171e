//! Shared value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Console verbosity, derived from the global `-q` / `-v` flags.
///
/// `Verbose(n)` counts the `-v` occurrences and is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose(u8),
}

impl Verbosity {
    /// Build from the raw flags. `quiet` wins over any number of `-v`.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose == 0 {
            Self::Normal
        } else {
            Self::Verbose(verbose)
        }
    }

    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose(_))
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose(level) => write!(f, "verbose({level})"),
        }
    }
}

/// Source of a configuration value.
///
/// Precedence chain: CLI arguments > environment > config file > programmatic > built-in defaults.
///
/// Serializes to lowercase strings: `"cli"`, `"env"`, `"config"`, `"programmatic"`, `"default"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value read from a `PHINGRUN_*` environment variable.
    Env,
    /// Value loaded from configuration file.
    Config,
    /// Value provided programmatically (e.g., `Config::builder()`).
    Programmatic,
    /// Built-in default value (lowest precedence).
    Default,
}

impl ConfigSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Env => "env",
            Self::Config => "config",
            Self::Programmatic => "programmatic",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose(1));
        assert_eq!(Verbosity::from_flags(false, 3), Verbosity::Verbose(3));
        assert_eq!(Verbosity::from_flags(true, 0), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
    }

    #[test]
    fn test_config_source_serialization() {
        let json = serde_json::to_string(&ConfigSource::Cli).unwrap();
        assert_eq!(json, r#""cli""#);
        let json = serde_json::to_string(&ConfigSource::Env).unwrap();
        assert_eq!(json, r#""env""#);
        let json = serde_json::to_string(&ConfigSource::Default).unwrap();
        assert_eq!(json, r#""default""#);
    }
}
