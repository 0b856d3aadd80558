use std::path::Path;

use super::*;

#[test]
fn default_registry_classifies_common_extensions() {
    let registry = SourceKindRegistry::default();
    assert_eq!(
        registry.classify(Path::new("src/widget.hpp")),
        Some(SourceKind::Interface)
    );
    assert_eq!(
        registry.classify(Path::new("src/widget.h")),
        Some(SourceKind::Interface)
    );
    assert_eq!(
        registry.classify(Path::new("src/widget.cc")),
        Some(SourceKind::Implementation)
    );
    assert_eq!(registry.classify(Path::new("README.md")), None);
    assert_eq!(registry.classify(Path::new("Makefile")), None);
}

#[test]
fn leading_dot_and_case_are_ignored() {
    let mut registry = SourceKindRegistry::new();
    registry.register(".IPP", SourceKind::Interface);
    assert_eq!(registry.get_by_extension("ipp"), Some(SourceKind::Interface));
    assert_eq!(
        registry.classify(Path::new("a/b.Ipp")),
        Some(SourceKind::Interface)
    );
}

#[test]
fn from_config_uses_configured_lists() {
    let files = FilesConfig {
        interface_extensions: vec!["inl".to_string()],
        implementation_extensions: vec!["cu".to_string()],
        exclude: Vec::new(),
    };
    let registry = SourceKindRegistry::from_config(&files);
    assert_eq!(registry.extensions(), vec!["cu", "inl"]);
    assert_eq!(registry.get_by_extension("cpp"), None);
}
