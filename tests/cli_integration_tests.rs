//! Integration tests for the `rules`, `init` and `config` commands.

mod common;

use common::{BASIC_CONFIG, TestFixture};
use predicates::prelude::*;

#[test]
fn help_lists_exit_codes() {
    cpp_style_guard!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes"));
}

#[test]
fn version_flag_prints_version() {
    cpp_style_guard!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// rules
// =============================================================================

#[test]
fn rules_lists_every_builtin_rule() {
    cpp_style_guard!()
        .args(["rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("line-width"))
        .stdout(predicate::str::contains("brace-style"))
        .stdout(predicate::str::contains("enum-class"))
        .stdout(predicate::str::contains("header-hygiene"))
        .stdout(predicate::str::contains("parameter-passing"));
}

#[test]
fn rules_json_is_parseable() {
    let output = cpp_style_guard!()
        .args(["rules", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 14);
    assert!(entries.iter().any(|e| e["id"] == "variable-naming"));
}

#[test]
fn rules_unknown_format_fails() {
    cpp_style_guard!()
        .args(["rules", "--format", "yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rules format"));
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_config_file() {
    let fixture = TestFixture::new();

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let content = fixture.read(".cpp-style-guard.toml");
    assert!(content.contains("max_line_width = 100"));
    assert!(content.contains("[heuristics]"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fixture.read(".cpp-style-guard.toml"), BASIC_CONFIG);

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["init", "--force"])
        .assert()
        .success();

    assert!(fixture.read(".cpp-style-guard.toml").contains("[severity_overrides]"));
}

#[test]
fn generated_config_is_valid() {
    let fixture = TestFixture::new();

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["init", "--output", "style.toml"])
        .assert()
        .success();

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate", "--config", "style.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_validate_reports_missing_file() {
    let fixture = TestFixture::new();

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_validate_rejects_unknown_rule() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
version = "1"
disable = ["brace-placement"]
"#,
    );

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("brace-placement"));
}

#[test]
fn config_show_defaults_as_json() {
    let output = cpp_style_guard!()
        .args(["--no-config", "config", "show", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["max_line_width"], 100);
}

#[test]
fn config_show_names_its_source() {
    let fixture = TestFixture::new();
    fixture.create_config("version = \"1\"\nmax_line_width = 120\n");

    cpp_style_guard!()
        .current_dir(fixture.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".cpp-style-guard.toml"))
        .stdout(predicate::str::contains("max_line_width = 120"));
}
