//! `mortise config get|list|path`

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }
        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let text = config.to_toml().map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.print(&text)?;
        }
        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }
    Ok(())
}

/// Optional keys are left out of the serialised config while unset.
const OPTIONAL_KEYS: [&str; 3] = ["project.base_name", "project.db_context", "templates.dir"];

/// Resolve a dotted key such as `project.src_dir` against the effective
/// configuration. Keys that exist but hold no value print as `<unset>`.
fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let Some(value) = key.split('.').try_fold(&tree, |node, part| node.get(part)) else {
        return if OPTIONAL_KEYS.contains(&key) {
            Ok("<unset>".to_string())
        } else {
            Err(unknown())
        };
    };

    match value {
        Value::Null => Ok("<unset>".to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        // A section, not a leaf.
        Value::Object(_) | Value::Array(_) => Err(unknown()),
    }
}
