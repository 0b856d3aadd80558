use crate::cli::RulesArgs;
use crate::rules::RuleRegistry;

use super::run_rules_impl;

fn args(format: &str) -> RulesArgs {
    RulesArgs {
        format: format.to_string(),
    }
}

#[test]
fn text_lists_every_rule_once_per_line() {
    let output = run_rules_impl(&args("text")).unwrap();
    let registry = RuleRegistry::builtin();

    assert_eq!(output.lines().count(), registry.iter().count());
    for rule in registry.iter() {
        assert!(
            output.lines().any(|line| line.starts_with(rule.id())),
            "missing {}",
            rule.id()
        );
    }
}

#[test]
fn text_columns_are_aligned() {
    let output = run_rules_impl(&args("text")).unwrap();
    let severity_columns: Vec<usize> = output
        .lines()
        .map(|line| {
            line.find("  error")
                .or_else(|| line.find("  warning"))
                .unwrap()
        })
        .collect();
    assert!(severity_columns.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn json_has_an_entry_per_rule() {
    let output = run_rules_impl(&args("JSON")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = value.as_array().unwrap();

    assert_eq!(entries.len(), 14);
    let line_width = entries.iter().find(|e| e["id"] == "line-width").unwrap();
    assert_eq!(line_width["default_severity"], "error");
    assert!(line_width["applies_to"].as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn unknown_format_is_rejected() {
    let err = run_rules_impl(&args("yaml")).unwrap_err();
    assert!(err.to_string().contains("Unknown rules format: yaml"));
}
