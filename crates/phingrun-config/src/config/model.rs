use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use phingrun_utils::types::ConfigSource;

/// Build file name used when none is requested
pub const DEFAULT_BUILD_FILE: &str = "build.xml";

/// Engine executable looked up when none is configured
pub const DEFAULT_EXECUTABLE: &str = "phing";

/// Project-level settings (`[project]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    /// Base directory for the default build file and the `basedir` property
    pub root_dir: PathBuf,
    /// Build file name joined onto `root_dir` when no file is requested
    pub default_file: String,
}

impl ProjectConfig {
    /// Create project settings rooted at `root_dir` with the default build file name.
    #[must_use]
    pub fn rooted_at(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            default_file: DEFAULT_BUILD_FILE.to_string(),
        }
    }
}

/// Engine settings (`[engine]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Phing home directory, exported as `PHING_HOME`
    pub home: Option<PathBuf>,
    /// PHP classpath, exported as `PHP_CLASSPATH`
    pub classpath: Option<PathBuf>,
    /// Executable name or path
    pub executable: String,
    /// Wall-clock limit for one engine run
    pub timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home: None,
            classpath: None,
            executable: DEFAULT_EXECUTABLE.to_string(),
            timeout_secs: None,
        }
    }
}

impl EngineConfig {
    /// Classpath handed to the engine.
    ///
    /// Falls back to `<home>/classes` when only the home is configured.
    #[must_use]
    pub fn effective_classpath(&self) -> Option<PathBuf> {
        self.classpath
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join("classes")))
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Effective phingrun configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub engine: EngineConfig,
    /// Config file that contributed values, if any
    pub config_path: Option<PathBuf>,
    /// Where each key's value came from
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Config {
    /// Configuration with built-in defaults for a project rooted at `root_dir`.
    #[must_use]
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        let mut source_attribution = HashMap::new();
        for key in Self::KEYS {
            source_attribution.insert((*key).to_string(), ConfigSource::Default);
        }

        Self {
            project: ProjectConfig::rooted_at(root_dir),
            engine: EngineConfig::default(),
            config_path: None,
            source_attribution,
        }
    }

    /// Every key that carries source attribution.
    pub const KEYS: &'static [&'static str] = &[
        "project.root_dir",
        "project.default_file",
        "engine.home",
        "engine.classpath",
        "engine.executable",
        "engine.timeout_secs",
    ];

    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.project.root_dir
    }

    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .copied()
            .unwrap_or(ConfigSource::Default)
    }
}

/// `[project]` as written in the TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct FileProject {
    pub root_dir: Option<PathBuf>,
    pub default_file: Option<String>,
}

/// `[engine]` as written in the TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct FileEngine {
    pub home: Option<PathBuf>,
    pub classpath: Option<PathBuf>,
    pub executable: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct TomlConfig {
    pub project: Option<FileProject>,
    pub engine: Option<FileEngine>,
}
