use super::*;
use crate::error::StyleGuardError;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.version.as_deref(), Some(CONFIG_VERSION));
    assert_eq!(config.max_line_width, 100);
    assert!(config.rules.is_none());
    assert!(config.disable.is_empty());
    assert_eq!(
        config.files.interface_extensions,
        vec!["h", "hh", "hpp", "hxx"]
    );
    assert_eq!(
        config.files.implementation_extensions,
        vec!["c", "cc", "cpp", "cxx"]
    );
    assert!(
        config
            .heuristics
            .sink_types
            .contains(&"std::unique_ptr".to_string())
    );
    assert_eq!(config.heuristics.macro_max_word_length, 0);
}

#[test]
fn empty_document_equals_default_except_version() {
    let config = parse_config("").unwrap();
    assert!(config.version.is_none());
    assert_eq!(
        Config {
            version: Some(CONFIG_VERSION.to_string()),
            ..config
        },
        Config::default()
    );
}

#[test]
fn default_serializes_and_parses_back() {
    let text = toml::to_string_pretty(&Config::default()).unwrap();
    assert_eq!(parse_config(&text).unwrap(), Config::default());
}

#[test]
fn validation_rejects_zero_width() {
    let config = Config {
        max_line_width: 0,
        ..Config::default()
    };
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn validation_rejects_overlapping_extensions() {
    let mut config = Config::default();
    config.files.implementation_extensions.push(".h".to_string());
    let err = validate_config_semantics(&config).unwrap_err();
    assert!(err.to_string().contains("'h'"));
}

#[test]
fn validation_rejects_no_extensions() {
    let mut config = Config::default();
    config.files.interface_extensions.clear();
    config.files.implementation_extensions.clear();
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn validation_rejects_empty_extension() {
    let mut config = Config::default();
    config.files.interface_extensions.push(".".to_string());
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn validation_rejects_bad_glob() {
    let mut config = Config::default();
    config.files.exclude.push("src/[unclosed".to_string());
    let err = validate_config_semantics(&config).unwrap_err();
    assert!(matches!(err, StyleGuardError::InvalidPattern { .. }));
}
