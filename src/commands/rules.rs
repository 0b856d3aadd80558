use std::fmt::Write;

use serde::Serialize;

use crate::cli::RulesArgs;
use crate::diagnostic::Severity;
use crate::rules::{Rule, RuleRegistry};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result, StyleGuardError};

#[must_use]
pub fn run_rules(args: &RulesArgs) -> i32 {
    match run_rules_impl(args) {
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

/// Render the built-in rule catalogue.
///
/// # Errors
/// Returns an error for an unknown format or if JSON serialization fails.
pub(crate) fn run_rules_impl(args: &RulesArgs) -> Result<String> {
    let registry = RuleRegistry::builtin();
    match args.format.to_lowercase().as_str() {
        "text" => Ok(format_rules_text(&registry)),
        "json" => format_rules_json(&registry),
        other => Err(StyleGuardError::Config(format!(
            "Unknown rules format: {other} (expected 'text' or 'json')"
        ))),
    }
}

#[derive(Serialize)]
struct RuleEntry {
    id: &'static str,
    default_severity: Severity,
    applies_to: Vec<String>,
    description: &'static str,
}

impl RuleEntry {
    fn new(rule: &dyn Rule) -> Self {
        Self {
            id: rule.id(),
            default_severity: rule.default_severity(),
            applies_to: rule.categories().iter().map(ToString::to_string).collect(),
            description: rule.description(),
        }
    }
}

fn format_rules_text(registry: &RuleRegistry) -> String {
    let width = registry.iter().map(|r| r.id().len()).max().unwrap_or(0);
    let mut output = String::new();
    for rule in registry.iter() {
        let _ = writeln!(
            output,
            "{:<width$}  {:<7}  {}",
            rule.id(),
            rule.default_severity().as_str(),
            rule.description()
        );
    }
    output
}

fn format_rules_json(registry: &RuleRegistry) -> Result<String> {
    let entries: Vec<RuleEntry> = registry.iter().map(RuleEntry::new).collect();
    let json = serde_json::to_string_pretty(&entries)?;
    Ok(format!("{json}\n"))
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
