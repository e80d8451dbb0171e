use std::env;
use std::path::{Path, PathBuf};

use phingrun_utils::error::ConfigError;

use super::model::TomlConfig;
use super::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CliArgs, Config, ConfigSource, ENV_PHING,
    ENV_PHING_CLASSPATH, ENV_PHING_HOME, ENV_ROOT_DIR,
};

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("Failed to get current directory: {e}"),
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        Self::discover_with_env(start_dir, cli_args, |key| env::var(key).ok())
    }

    /// Discover configuration with an injected environment lookup.
    ///
    /// This is the variant used by tests to avoid process-global state.
    /// Empty environment values are ignored.
    pub fn discover_with_env<F>(
        start_dir: &Path,
        cli_args: &CliArgs,
        env_lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                let explicit = start_dir.join(explicit);
                if !explicit.is_file() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    });
                }
                Some(explicit)
            }
            None => Self::discover_config_file_from(start_dir),
        };

        let project_dir = config_path
            .as_deref()
            .map_or_else(|| start_dir.to_path_buf(), project_dir_for);

        let mut config = Self::with_root(&project_dir);

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "Loading config file");
            let file_config = Self::load_config_file(path)?;
            config.apply_file(file_config, &project_dir);
            config.config_path = Some(path.clone());
        }

        let env_value = |key: &str| env_lookup(key).filter(|value| !value.is_empty());

        if let Some(root_dir) = env_value(ENV_ROOT_DIR) {
            config.project.root_dir = resolve_against(start_dir, root_dir);
            config.attribute("project.root_dir", ConfigSource::Env);
        }
        if let Some(home) = env_value(ENV_PHING_HOME) {
            config.engine.home = Some(resolve_against(start_dir, home));
            config.attribute("engine.home", ConfigSource::Env);
        }
        if let Some(classpath) = env_value(ENV_PHING_CLASSPATH) {
            config.engine.classpath = Some(resolve_against(start_dir, classpath));
            config.attribute("engine.classpath", ConfigSource::Env);
        }
        if let Some(executable) = env_value(ENV_PHING) {
            config.engine.executable = executable;
            config.attribute("engine.executable", ConfigSource::Env);
        }

        config.apply_cli(cli_args, start_dir);

        config.validate()?;

        Ok(config)
    }

    /// Discover config file by searching upward from a given directory.
    ///
    /// Walks up the directory tree looking for `.phingrun/config.toml`, stopping
    /// at repository root markers (.git, .hg, .svn) or the filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = Some(start_dir);

        while let Some(dir) = current_dir {
            let config_path = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            if dir.join(".git").exists() || dir.join(".hg").exists() || dir.join(".svn").exists() {
                break;
            }

            current_dir = dir.parent();
        }

        None
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_file(&mut self, file_config: TomlConfig, project_dir: &Path) {
        let source = ConfigSource::Config;

        if let Some(project) = file_config.project {
            if let Some(root_dir) = project.root_dir {
                self.project.root_dir = resolve_against(project_dir, root_dir);
                self.attribute("project.root_dir", source);
            }
            if let Some(default_file) = project.default_file {
                self.project.default_file = default_file;
                self.attribute("project.default_file", source);
            }
        }

        if let Some(engine) = file_config.engine {
            if let Some(home) = engine.home {
                self.engine.home = Some(resolve_against(project_dir, home));
                self.attribute("engine.home", source);
            }
            if let Some(classpath) = engine.classpath {
                self.engine.classpath = Some(resolve_against(project_dir, classpath));
                self.attribute("engine.classpath", source);
            }
            if let Some(executable) = engine.executable {
                self.engine.executable = executable;
                self.attribute("engine.executable", source);
            }
            if engine.timeout_secs.is_some() {
                self.engine.timeout_secs = engine.timeout_secs;
                self.attribute("engine.timeout_secs", source);
            }
        }
    }

    fn apply_cli(&mut self, cli_args: &CliArgs, start_dir: &Path) {
        if let Some(root_dir) = &cli_args.root_dir {
            self.project.root_dir = resolve_against(start_dir, root_dir);
            self.attribute("project.root_dir", ConfigSource::Cli);
        }
        if let Some(home) = &cli_args.phing_home {
            self.engine.home = Some(resolve_against(start_dir, home));
            self.attribute("engine.home", ConfigSource::Cli);
        }
        if let Some(classpath) = &cli_args.phing_classpath {
            self.engine.classpath = Some(resolve_against(start_dir, classpath));
            self.attribute("engine.classpath", ConfigSource::Cli);
        }
        if let Some(executable) = &cli_args.phing {
            self.engine.executable = executable.clone();
            self.attribute("engine.executable", ConfigSource::Cli);
        }
        if cli_args.timeout_secs.is_some() {
            self.engine.timeout_secs = cli_args.timeout_secs;
            self.attribute("engine.timeout_secs", ConfigSource::Cli);
        }
    }

    pub(crate) fn attribute(&mut self, key: &str, source: ConfigSource) {
        self.source_attribution.insert(key.to_string(), source);
    }
}

/// Join `path` onto `base`, dropping `.` components so `root_dir = "."`
/// yields the base itself.
fn resolve_against(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    base.join(path).components().collect()
}

/// Directory a config file belongs to: the parent of `.phingrun/`, or the
/// file's own directory for a file living elsewhere.
fn project_dir_for(config_path: &Path) -> PathBuf {
    let Some(parent) = config_path.parent() else {
        return PathBuf::from(".");
    };

    if parent.file_name().is_some_and(|name| name == CONFIG_DIR_NAME)
        && let Some(project) = parent.parent()
    {
        return project.to_path_buf();
    }

    parent.to_path_buf()
}
