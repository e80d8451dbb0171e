//! Configuration management for phingrun
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > environment > file > defaults. The TOML file lives at
//! `.phingrun/config.toml` and supports `[project]` and `[engine]` sections.
//!
//! ```toml
//! [project]
//! root_dir = "."
//! default_file = "build.xml"
//!
//! [engine]
//! home = "vendor/phing/phing"
//! executable = "phing"
//! timeout_secs = 1800
//! ```

mod builder;
mod cli_args;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use cli_args::CliArgs;
pub use model::{Config, DEFAULT_BUILD_FILE, DEFAULT_EXECUTABLE, EngineConfig, ProjectConfig};
pub use phingrun_utils::types::ConfigSource;
pub use validation::MAX_TIMEOUT_SECS;

/// Directory holding the config file
pub const CONFIG_DIR_NAME: &str = ".phingrun";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_ROOT_DIR: &str = "PHINGRUN_ROOT_DIR";
pub const ENV_PHING_HOME: &str = "PHINGRUN_PHING_HOME";
pub const ENV_PHING_CLASSPATH: &str = "PHINGRUN_PHING_CLASSPATH";
pub const ENV_PHING: &str = "PHINGRUN_PHING";

#[cfg(test)]
mod tests {
    use super::*;
    use phingrun_utils::error::ConfigError;
    use std::collections::HashMap;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_dir = dir.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, content).unwrap();

        config_path
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn discover(start_dir: &Path, cli_args: &CliArgs) -> Result<Config, ConfigError> {
        Config::discover_with_env(start_dir, cli_args, no_env)
    }

    #[test]
    fn test_default_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();

        let config = discover(temp_dir.path(), &CliArgs::default()).unwrap();

        assert_eq!(config.project.root_dir, temp_dir.path());
        assert_eq!(config.project.default_file, DEFAULT_BUILD_FILE);
        assert_eq!(config.engine.executable, DEFAULT_EXECUTABLE);
        assert_eq!(config.engine.home, None);
        assert_eq!(config.engine.effective_classpath(), None);
        assert_eq!(config.engine.timeout(), None);
        assert!(config.config_path.is_none());
        for key in Config::KEYS {
            assert_eq!(config.source_of(key), ConfigSource::Default, "{key}");
        }
    }

    #[test]
    fn test_config_file_values_resolved_against_project_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(
            temp_dir.path(),
            r#"
[project]
root_dir = "app"
default_file = "deploy.xml"

[engine]
home = "vendor/phing"
executable = "phing.phar"
timeout_secs = 600
"#,
        );
        let nested = temp_dir.path().join("app").join("src");
        fs::create_dir_all(&nested).unwrap();

        let config = discover(&nested, &CliArgs::default()).unwrap();

        assert_eq!(config.project.root_dir, temp_dir.path().join("app"));
        assert_eq!(config.project.default_file, "deploy.xml");
        assert_eq!(
            config.engine.home,
            Some(temp_dir.path().join("vendor/phing"))
        );
        assert_eq!(
            config.engine.effective_classpath(),
            Some(temp_dir.path().join("vendor/phing").join("classes"))
        );
        assert_eq!(config.engine.executable, "phing.phar");
        assert_eq!(config.engine.timeout_secs, Some(600));
        assert_eq!(config.source_of("engine.home"), ConfigSource::Config);
        assert_eq!(config.source_of("engine.classpath"), ConfigSource::Default);
    }

    #[test]
    fn test_root_dir_defaults_to_project_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(temp_dir.path(), "");
        let nested = temp_dir.path().join("docs");
        fs::create_dir_all(&nested).unwrap();

        let config = discover(&nested, &CliArgs::default()).unwrap();

        assert_eq!(config.project.root_dir, temp_dir.path());
        assert_eq!(config.source_of("project.root_dir"), ConfigSource::Default);
    }

    #[test]
    fn test_current_dir_components_are_dropped() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(
            temp_dir.path(),
            "[project]\nroot_dir = \".\"\n\n[engine]\nhome = \"./vendor/./phing\"\n",
        );

        let config = discover(temp_dir.path(), &CliArgs::default()).unwrap();

        // Path equality ignores `.` components, so compare the raw text.
        assert_eq!(
            config.project.root_dir.as_os_str(),
            temp_dir.path().as_os_str()
        );
        assert_eq!(
            config.engine.home.as_deref().map(Path::as_os_str),
            Some(temp_dir.path().join("vendor").join("phing").as_os_str())
        );

        let cli_args = CliArgs {
            root_dir: Some(PathBuf::from(".")),
            ..CliArgs::default()
        };
        let config = discover(temp_dir.path(), &cli_args).unwrap();
        assert_eq!(
            config.project.root_dir.as_os_str(),
            temp_dir.path().as_os_str()
        );
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(
            temp_dir.path(),
            r#"
[engine]
executable = "from-file"
home = "/file/home"
classpath = "/file/classes"
"#,
        );

        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PHING, "from-env"),
            (ENV_PHING_HOME, "/env/home"),
            (ENV_ROOT_DIR, "/env/root"),
        ]);
        let cli_args = CliArgs {
            phing: Some("from-cli".to_string()),
            ..Default::default()
        };

        let config = Config::discover_with_env(temp_dir.path(), &cli_args, |key| {
            env.get(key).map(|value| (*value).to_string())
        })
        .unwrap();

        assert_eq!(config.engine.executable, "from-cli");
        assert_eq!(config.source_of("engine.executable"), ConfigSource::Cli);

        assert_eq!(config.engine.home, Some(PathBuf::from("/env/home")));
        assert_eq!(config.source_of("engine.home"), ConfigSource::Env);

        assert_eq!(config.project.root_dir, PathBuf::from("/env/root"));
        assert_eq!(config.source_of("project.root_dir"), ConfigSource::Env);

        assert_eq!(
            config.engine.classpath,
            Some(PathBuf::from("/file/classes"))
        );
        assert_eq!(config.source_of("engine.classpath"), ConfigSource::Config);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();

        let config = Config::discover_with_env(temp_dir.path(), &CliArgs::default(), |key| {
            (key == ENV_PHING).then(String::new)
        })
        .unwrap();

        assert_eq!(config.engine.executable, DEFAULT_EXECUTABLE);
        assert_eq!(config.source_of("engine.executable"), ConfigSource::Default);
    }

    #[test]
    fn test_relative_cli_paths_resolved_against_start_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        let cli_args = CliArgs {
            root_dir: Some(PathBuf::from("site")),
            timeout_secs: Some(30),
            ..Default::default()
        };

        let config = discover(temp_dir.path(), &cli_args).unwrap();

        assert_eq!(config.project.root_dir, temp_dir.path().join("site"));
        assert_eq!(config.engine.timeout_secs, Some(30));
        assert_eq!(config.source_of("engine.timeout_secs"), ConfigSource::Cli);
    }

    #[test]
    fn test_discovery_stops_at_repository_root() {
        let temp_dir = TempDir::new().unwrap();
        create_test_config_file(temp_dir.path(), "[engine]\nexecutable = \"outer\"\n");
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let nested = repo.join("sub");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config_file_from(&nested), None);

        let config = discover(&nested, &CliArgs::default()).unwrap();
        assert_eq!(config.engine.executable, DEFAULT_EXECUTABLE);
    }

    #[test]
    fn test_discovery_finds_file_inside_repository() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".hg")).unwrap();
        let config_path = create_test_config_file(temp_dir.path(), "");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            Config::discover_config_file_from(&nested),
            Some(config_path)
        );
    }

    #[test]
    fn test_explicit_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("phingrun.toml");
        fs::write(&explicit, "[project]\ndefault_file = \"ci.xml\"\n").unwrap();

        let cli_args = CliArgs {
            config_path: Some(explicit.clone()),
            ..Default::default()
        };
        let config = discover(temp_dir.path(), &cli_args).unwrap();

        assert_eq!(config.config_path, Some(explicit));
        assert_eq!(config.project.default_file, "ci.xml");
        assert_eq!(config.project.root_dir, temp_dir.path());
    }

    #[test]
    fn test_explicit_config_path_missing() {
        let temp_dir = TempDir::new().unwrap();
        let cli_args = CliArgs {
            config_path: Some(PathBuf::from("missing.toml")),
            ..Default::default()
        };

        assert!(matches!(
            discover(temp_dir.path(), &cli_args),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(temp_dir.path(), "[engine\nexecutable = ");

        assert!(matches!(
            discover(temp_dir.path(), &CliArgs::default()),
            Err(ConfigError::InvalidFile { .. })
        ));
    }

    #[test]
    fn test_config_with_wrong_types() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(temp_dir.path(), "[engine]\ntimeout_secs = \"soon\"\n");

        assert!(matches!(
            discover(temp_dir.path(), &CliArgs::default()),
            Err(ConfigError::InvalidFile { .. })
        ));
    }

    #[test]
    fn test_config_with_only_comments() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(temp_dir.path(), "# nothing configured yet\n");

        let config = discover(temp_dir.path(), &CliArgs::default()).unwrap();
        assert!(config.config_path.is_some());
        assert_eq!(config.engine.executable, DEFAULT_EXECUTABLE);
    }

    #[test]
    fn test_config_validation_rejects_empty_executable() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        create_test_config_file(temp_dir.path(), "[engine]\nexecutable = \"\"\n");

        match discover(temp_dir.path(), &CliArgs::default()) {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "engine.executable"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_effective_config() {
        let config = Config::builder()
            .root_dir("/srv/app")
            .phing_home("/opt/phing")
            .build()
            .unwrap();

        let effective = config.effective_config();

        assert_eq!(
            effective.get("project.root_dir"),
            Some(&("/srv/app".to_string(), "programmatic".to_string()))
        );
        assert_eq!(
            effective.get("engine.executable"),
            Some(&("phing".to_string(), "default".to_string()))
        );
        assert_eq!(
            effective.get("engine.classpath").map(|(_, source)| source.as_str()),
            Some("default")
        );
        assert!(!effective.contains_key("engine.timeout_secs"));
    }
}
