use phingrun_utils::error::ConfigError;

use super::Config;

/// Upper bound for `engine.timeout_secs` (24 hours)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

fn empty_value(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: "cannot be empty".to_string(),
    }
}

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.project.root_dir.as_os_str().is_empty() {
            return Err(empty_value("project.root_dir"));
        }

        if self.project.default_file.trim().is_empty() {
            return Err(empty_value("project.default_file"));
        }

        if self.engine.executable.trim().is_empty() {
            return Err(empty_value("engine.executable"));
        }

        if let Some(home) = &self.engine.home
            && home.as_os_str().is_empty()
        {
            return Err(empty_value("engine.home"));
        }

        if let Some(classpath) = &self.engine.classpath
            && classpath.as_os_str().is_empty()
        {
            return Err(empty_value("engine.classpath"));
        }

        if let Some(timeout) = self.engine.timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "engine.timeout_secs".to_string(),
                    value: "must be at least 1 second".to_string(),
                });
            }
            if timeout > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    key: "engine.timeout_secs".to_string(),
                    value: format!(
                        "exceeds maximum limit of {MAX_TIMEOUT_SECS} seconds (24 hours)"
                    ),
                });
            }
        }

        Ok(())
    }
}
