//! Config command implementation
//!
//! Handles `phingrun config` and `phingrun config --json`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::{Config, ExitCode, PhingrunError};

#[derive(Debug, Serialize)]
struct ConfigValue<'a> {
    value: &'a str,
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    config_file: Option<String>,
    values: BTreeMap<&'a str, ConfigValue<'a>>,
}

fn build_report<'a>(
    config: &Config,
    effective: &'a BTreeMap<String, (String, String)>,
) -> ConfigReport<'a> {
    ConfigReport {
        config_file: config
            .config_path
            .as_ref()
            .map(|path| path.display().to_string()),
        values: effective
            .iter()
            .map(|(key, (value, source))| (key.as_str(), ConfigValue { value, source }))
            .collect(),
    }
}

fn render_table(report: &ConfigReport<'_>) -> String {
    let mut table = String::from("Effective configuration:\n");
    table.push_str(&format!(
        "  config file: {}\n",
        report.config_file.as_deref().unwrap_or("(none)")
    ));

    let width = report.values.keys().map(|key| key.len()).max().unwrap_or(0);
    for (key, entry) in &report.values {
        table.push_str(&format!("  {key:<width$} = {}  [{}]\n", entry.value, entry.source));
    }

    table
}

/// Write the rendered report; a closed or failing stdout surfaces as an I/O error.
fn emit(out: &mut impl Write, rendered: &str) -> Result<(), PhingrunError> {
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Execute the config command
pub fn execute_config_command(config: &Config, json: bool) -> Result<ExitCode> {
    let effective = config.effective_config();
    let report = build_report(config, &effective);

    let rendered = if json {
        let mut rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize configuration")?;
        rendered.push('\n');
        rendered
    } else {
        render_table(&report)
    };

    emit(&mut std::io::stdout().lock(), &rendered)?;

    Ok(ExitCode::SUCCESS)
}
