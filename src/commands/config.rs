use std::fmt::Write;
use std::path::Path;

use crate::cli::{Cli, ConfigAction};
use crate::config::{ConfigLoader, FileConfigLoader, LoadResult};
use crate::rules::RuleRegistry;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result, StyleGuardError};

use super::context::load_config;

#[must_use]
pub fn run_config(args: &crate::cli::ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), format, cli),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates a configuration file, including the rule ids it names.
///
/// # Errors
/// Returns an error if the file doesn't exist, contains invalid TOML, has
/// semantic errors or refers to an unknown rule.
pub(crate) fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(StyleGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let loaded = FileConfigLoader::new().load_from_path(config_path)?;
    RuleRegistry::builtin().select(&loaded.config)?;
    Ok(())
}

fn run_config_show(config_path: Option<&Path>, format: &str, cli: &Cli) -> i32 {
    match run_config_show_impl(config_path, format, cli.no_config) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Shows the effective configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded, the format is
/// unknown or serialization fails.
pub(crate) fn run_config_show_impl(
    config_path: Option<&Path>,
    format: &str,
    no_config: bool,
) -> Result<String> {
    let loaded = load_config(config_path, no_config)?;

    match format.to_lowercase().as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&loaded.config)?;
            Ok(format!("{json}\n"))
        }
        "text" | "toml" => format_config_text(&loaded),
        other => Err(StyleGuardError::Config(format!(
            "Unknown config format: {other} (expected 'text' or 'json')"
        ))),
    }
}

pub(crate) fn format_config_text(loaded: &LoadResult) -> Result<String> {
    let mut output = String::new();
    match &loaded.source {
        Some(path) => {
            let _ = writeln!(output, "# Effective configuration (from {})", path.display());
        }
        None => output.push_str("# Effective configuration (built-in defaults)\n"),
    }
    output.push('\n');
    output.push_str(&toml::to_string_pretty(&loaded.config)?);
    Ok(output)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
