use std::path::PathBuf;
use std::time::Duration;

use phingrun_utils::error::ConfigError;

use super::{Config, ConfigSource};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// Use this when embedding phingrun without environment variables or a
    /// config file.
    ///
    /// # Example
    ///
    /// ```rust
    /// use phingrun_config::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::builder()
    ///     .root_dir("/srv/app")
    ///     .phing_home("/opt/phing")
    ///     .timeout(Duration::from_secs(600))
    ///     .build()
    ///     .expect("Failed to build config");
    ///
    /// assert_eq!(config.engine.executable, "phing");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration of phingrun.
///
/// All values set via the builder are attributed to `ConfigSource::Programmatic`.
/// The root directory must be set; everything else falls back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    default_file: Option<String>,
    phing_home: Option<PathBuf>,
    phing_classpath: Option<PathBuf>,
    executable: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project root used for the default build file and `basedir`.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Set the build file name used when none is requested.
    #[must_use]
    pub fn default_file(mut self, name: impl Into<String>) -> Self {
        self.default_file = Some(name.into());
        self
    }

    #[must_use]
    pub fn phing_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.phing_home = Some(path.into());
        self
    }

    #[must_use]
    pub fn phing_classpath(mut self, path: impl Into<PathBuf>) -> Self {
        self.phing_classpath = Some(path.into());
        self
    }

    /// Set the engine executable name or path.
    #[must_use]
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    /// Set the engine timeout. Sub-second precision is dropped.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the root directory is missing or
    /// any value fails validation.
    pub fn build(self) -> Result<Config, ConfigError> {
        let Some(root_dir) = self.root_dir else {
            return Err(ConfigError::InvalidValue {
                key: "project.root_dir".to_string(),
                value: "must be set".to_string(),
            });
        };

        let mut config = Config::with_root(root_dir);
        config.attribute("project.root_dir", ConfigSource::Programmatic);

        if let Some(default_file) = self.default_file {
            config.project.default_file = default_file;
            config.attribute("project.default_file", ConfigSource::Programmatic);
        }
        if let Some(home) = self.phing_home {
            config.engine.home = Some(home);
            config.attribute("engine.home", ConfigSource::Programmatic);
        }
        if let Some(classpath) = self.phing_classpath {
            config.engine.classpath = Some(classpath);
            config.attribute("engine.classpath", ConfigSource::Programmatic);
        }
        if let Some(executable) = self.executable {
            config.engine.executable = executable;
            config.attribute("engine.executable", ConfigSource::Programmatic);
        }
        if let Some(timeout) = self.timeout {
            config.engine.timeout_secs = Some(timeout.as_secs());
            config.attribute("engine.timeout_secs", ConfigSource::Programmatic);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_values_and_attribution() {
        let config = Config::builder()
            .root_dir("/srv/app")
            .default_file("deploy.xml")
            .phing_home("/opt/phing")
            .executable("phing.phar")
            .timeout(Duration::from_secs(90))
            .build()
            .unwrap();

        assert_eq!(config.project.root_dir, PathBuf::from("/srv/app"));
        assert_eq!(config.project.default_file, "deploy.xml");
        assert_eq!(config.engine.executable, "phing.phar");
        assert_eq!(config.engine.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(
            config.engine.effective_classpath(),
            Some(PathBuf::from("/opt/phing/classes"))
        );
        assert_eq!(config.source_of("engine.home"), ConfigSource::Programmatic);
        assert_eq!(config.source_of("engine.classpath"), ConfigSource::Default);
    }

    #[test]
    fn test_builder_requires_root_dir() {
        match Config::builder().build() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "project.root_dir"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_validates() {
        let result = Config::builder()
            .root_dir("/srv/app")
            .timeout(Duration::from_millis(500))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "engine.timeout_secs"
        ));
    }
}
