use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;

use super::*;
use crate::parser::{Category, DeclNode};
use crate::rules::{Finding, Rule, RuleRegistry};

#[derive(Default)]
struct MockFileReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MockFileReader {
    fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(PathBuf::from(path), content.into());
        self
    }
}

impl FileReader for MockFileReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }
}

fn rule_ids(report: &FileReport) -> Vec<&str> {
    report
        .diagnostics
        .iter()
        .map(|d| d.rule_id.as_str())
        .collect()
}

fn count_rule(report: &FileReport, id: &str) -> usize {
    rule_ids(report).iter().filter(|r| **r == id).count()
}

fn check(src: &str, kind: SourceKind) -> FileReport {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let path = match kind {
        SourceKind::Interface => "widget.hpp",
        SourceKind::Implementation => "widget.cpp",
    };
    Engine::new(&rules, &config).check_source(Path::new(path), src, kind)
}

#[test]
fn well_passed_parameters_produce_no_parameter_diagnostics() {
    let report = check(
        "void exampleFunction(int pod, const Example& object, char& modifiableChar);\n",
        SourceKind::Implementation,
    );
    assert_eq!(count_rule(&report, "parameter-passing"), 0);
}

#[test]
fn unmodified_by_value_object_produces_one_parameter_diagnostic() {
    let report = check(
        "void exampleFunction(Example object);\n",
        SourceKind::Implementation,
    );
    assert_eq!(count_rule(&report, "parameter-passing"), 1);
}

#[test]
fn global_prefix_is_required() {
    let report = check("int name;\n", SourceKind::Implementation);
    assert_eq!(count_rule(&report, "variable-naming"), 1);
    let report = check("int g_name;\n", SourceKind::Implementation);
    assert_eq!(count_rule(&report, "variable-naming"), 0);
}

#[test]
fn plain_enum_is_reported_once() {
    let report = check("enum Color { RED, GREEN };\n", SourceKind::Implementation);
    assert_eq!(count_rule(&report, "enum-class"), 1);
    let report = check("enum class Color { RED, GREEN };\n", SourceKind::Implementation);
    assert_eq!(count_rule(&report, "enum-class"), 0);
}

#[test]
fn line_width_boundary() {
    let exact = format!("// {}\n", "x".repeat(97));
    assert_eq!(exact.trim_end().chars().count(), 100);
    assert_eq!(count_rule(&check(&exact, SourceKind::Implementation), "line-width"), 0);

    let over = format!("// {}\n", "x".repeat(98));
    let report = check(&over, SourceKind::Implementation);
    assert_eq!(count_rule(&report, "line-width"), 1);
    let diagnostic = report
        .diagnostics
        .iter()
        .find(|d| d.rule_id == "line-width")
        .unwrap();
    assert_eq!((diagnostic.line, diagnostic.column), (1, 101));
}

#[test]
fn diagnostics_carry_rule_severity_and_path() {
    let registry = RuleRegistry::builtin();
    let mut config = Config::default();
    config
        .severity_overrides
        .insert("enum-class".to_string(), Severity::Warning);
    let rules = registry.select(&config).unwrap();
    let report = Engine::new(&rules, &config).check_source(
        Path::new("src/color.cpp"),
        "enum Color { RED };\n",
        SourceKind::Implementation,
    );
    let diagnostic = report
        .diagnostics
        .iter()
        .find(|d| d.rule_id == "enum-class")
        .unwrap();
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.category, DiagnosticCategory::Rule);
    assert_eq!(diagnostic.path, PathBuf::from("src/color.cpp"));
    assert_eq!((diagnostic.line, diagnostic.column), (1, 1));
}

#[test]
fn malformed_input_is_reported_and_prefix_still_checked() {
    let src = "int name;\nconst char* g_text = \"abc\n";
    let report = check(src, SourceKind::Implementation);
    let malformed: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.rule_id == MALFORMED_INPUT)
        .collect();
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].category, DiagnosticCategory::MalformedSource);
    assert_eq!(malformed[0].line, 2);
    assert_eq!(malformed[0].message, "unterminated string literal");
    assert_eq!(count_rule(&report, "variable-naming"), 1);
}

#[test]
fn diagnostics_within_a_file_are_sorted() {
    let src = "enum Color { red };\nint name;\n";
    let report = check(src, SourceKind::Implementation);
    let mut sorted = report.diagnostics.clone();
    sorted.sort();
    assert_eq!(report.diagnostics, sorted);
    assert!(report.diagnostics.len() >= 3);
}

struct Exploding;

impl Rule for Exploding {
    fn id(&self) -> &'static str {
        "exploding"
    }

    fn description(&self) -> &'static str {
        "panics on every function"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Function]
    }

    fn check(&self, _node: &DeclNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        panic!("index out of range");
    }
}

#[test]
fn panicking_rule_becomes_internal_error_and_others_still_run() {
    let mut registry = RuleRegistry::builtin();
    registry.register(Box::new(Exploding));
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let report = Engine::new(&rules, &config).check_source(
        Path::new("a.cpp"),
        "void Run();\nint name;\n",
        SourceKind::Implementation,
    );

    let internal: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.rule_id == INTERNAL_ERROR)
        .collect();
    assert_eq!(internal.len(), 1);
    assert_eq!(internal[0].category, DiagnosticCategory::Internal);
    assert!(internal[0].message.contains("exploding"));
    assert!(internal[0].message.contains("index out of range"));
    assert_eq!(count_rule(&report, "function-naming"), 1);
    assert_eq!(count_rule(&report, "variable-naming"), 1);
}

#[test]
fn unreadable_file_becomes_input_error() {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let reader = MockFileReader::default();
    let engine = Engine::new(&rules, &config).with_reader(&reader);

    let report = engine.check_file(&SourceFile::new("missing.cpp", SourceKind::Implementation));
    assert_eq!(rule_ids(&report), vec![INPUT_ERROR]);
    assert_eq!(report.diagnostics[0].category, DiagnosticCategory::Input);
    assert!(report.diagnostics[0].message.contains("file not found"));
}

#[test]
fn invalid_utf8_points_at_first_bad_byte() {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let reader = MockFileReader::default().with_file("latin1.h", b"int g_a;\nin\xFFt g_b;\n".to_vec());
    let engine = Engine::new(&rules, &config).with_reader(&reader);

    let report = engine.check_file(&SourceFile::new("latin1.h", SourceKind::Interface));
    assert_eq!(rule_ids(&report), vec![INPUT_ERROR]);
    assert_eq!(
        (report.diagnostics[0].line, report.diagnostics[0].column),
        (2, 3)
    );
    assert_eq!(
        report.diagnostics[0].message,
        "File is not valid UTF-8: latin1.h"
    );
}

fn sample_reader() -> MockFileReader {
    MockFileReader::default()
        .with_file("a.cpp", "enum Color { RED };\n")
        .with_file("b.cpp", "int g_count;\n")
        .with_file("c.hpp", "int name;\n")
}

fn sample_files() -> Vec<SourceFile> {
    vec![
        SourceFile::new("a.cpp", SourceKind::Implementation),
        SourceFile::new("b.cpp", SourceKind::Implementation),
        SourceFile::new("c.hpp", SourceKind::Interface),
    ]
}

#[test]
fn run_merges_and_sorts_every_file() {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let reader = sample_reader();
    let engine = Engine::new(&rules, &config).with_reader(&reader);
    let visited = AtomicUsize::new(0);

    let report = engine
        .run(&sample_files(), 0, || {
            visited.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

    assert_eq!(visited.load(Ordering::Relaxed), 3);
    assert_eq!(report.files_checked(), 3);
    assert_eq!(report.files_skipped(), 0);
    let mut paths: Vec<_> = report
        .diagnostics()
        .iter()
        .map(|d| d.path.to_string_lossy().into_owned())
        .collect();
    paths.dedup();
    assert_eq!(paths, vec!["a.cpp", "c.hpp"]);
}

#[test]
fn two_runs_are_identical() {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let reader = sample_reader();
    let engine = Engine::new(&rules, &config).with_reader(&reader);

    let first = engine.run(&sample_files(), 4, || {}).unwrap();
    let second = engine.run(&sample_files(), 1, || {}).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fail_fast_skips_files_after_the_first_error() {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let reader = sample_reader();
    let engine = Engine::new(&rules, &config)
        .with_reader(&reader)
        .with_fail_fast(true);

    let report = engine.run(&sample_files(), 1, || {}).unwrap();
    assert_eq!(report.files_checked(), 1);
    assert_eq!(report.files_skipped(), 2);
    assert!(engine.cancel_token().is_cancelled());
}

#[test]
fn cancelled_run_starts_no_files() {
    let registry = RuleRegistry::builtin();
    let config = Config::default();
    let rules = registry.select(&config).unwrap();
    let reader = sample_reader();
    let cancel = CancelToken::new();
    cancel.cancel();
    let engine = Engine::new(&rules, &config)
        .with_reader(&reader)
        .with_cancel_token(cancel);

    let report = engine.run(&sample_files(), 2, || {}).unwrap();
    assert_eq!(report.files_checked(), 0);
    assert_eq!(report.files_skipped(), 3);
    assert!(report.diagnostics().is_empty());
}

#[test]
fn contained_panic_returns_its_message() {
    assert_eq!(contain(|| 7), Ok(7));
    let outcome: std::result::Result<(), String> = contain(|| panic!("parser lost its place"));
    assert_eq!(outcome, Err("parser lost its place".to_string()));
    assert!(!CONTAINED.with(Cell::get));
}

#[test]
fn nested_containment_restores_outer_state() {
    let outer = contain(|| {
        let inner: std::result::Result<(), String> = contain(|| panic!("inner"));
        assert!(inner.is_err());
        CONTAINED.with(Cell::get)
    });
    assert_eq!(outer, Ok(true));
    assert!(!CONTAINED.with(Cell::get));
}

#[test]
fn directory_walk_failure_becomes_input_error() {
    let source = walkdir::WalkDir::new("definitely/not/here")
        .into_iter()
        .next()
        .unwrap()
        .unwrap_err();
    let error = StyleGuardError::DirectoryWalk {
        path: PathBuf::from("definitely/not/here"),
        source,
    };

    let diagnostic = input_error(Path::new("definitely/not/here"), &error);
    assert_eq!(diagnostic.rule_id, INPUT_ERROR);
    assert_eq!(diagnostic.category, DiagnosticCategory::Input);
    assert_eq!((diagnostic.line, diagnostic.column), (1, 1));
    assert!(
        diagnostic
            .message
            .starts_with("Failed to read directory entry: definitely/not/here: ")
    );
}
