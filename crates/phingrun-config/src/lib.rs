//! Configuration for phingrun
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > environment > file > defaults.

pub mod config;

pub use config::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CliArgs, Config, ConfigBuilder, ConfigSource,
    DEFAULT_BUILD_FILE, DEFAULT_EXECUTABLE, EngineConfig, ProjectConfig,
};
