use std::collections::BTreeMap;

use super::Config;

impl Config {
    /// Get effective configuration as key-value pairs with source attribution.
    ///
    /// Unset optional values are omitted. Keys are ordered for stable output.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let mut config = BTreeMap::new();

        let mut add_config = |key: &str, value: Option<String>| {
            if let Some(val) = value {
                let source = self.source_of(key).as_str().to_string();
                config.insert(key.to_string(), (val, source));
            }
        };

        add_config(
            "project.root_dir",
            Some(self.project.root_dir.display().to_string()),
        );
        add_config(
            "project.default_file",
            Some(self.project.default_file.clone()),
        );
        add_config(
            "engine.home",
            self.engine.home.as_ref().map(|p| p.display().to_string()),
        );
        add_config(
            "engine.classpath",
            self.engine
                .effective_classpath()
                .map(|p| p.display().to_string()),
        );
        add_config("engine.executable", Some(self.engine.executable.clone()));
        add_config(
            "engine.timeout_secs",
            self.engine.timeout_secs.map(|secs| secs.to_string()),
        );

        config
    }
}
