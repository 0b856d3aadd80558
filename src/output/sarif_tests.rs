use super::*;
use crate::diagnostic::DiagnosticCategory;
use crate::engine::FileReport;

fn sample_report() -> Report {
    Report::new(
        vec![FileReport::new(
            "include/widget.hpp",
            vec![
                Diagnostic::new(
                    "include/widget.hpp",
                    "namespace-using",
                    Severity::Error,
                    DiagnosticCategory::Rule,
                    "`using namespace std` in an interface file",
                    4,
                    1,
                ),
                Diagnostic::new(
                    "include/widget.hpp",
                    MALFORMED_INPUT,
                    Severity::Error,
                    DiagnosticCategory::MalformedSource,
                    "unterminated block comment",
                    9,
                    3,
                ),
            ],
        )],
        0,
    )
}

fn render(report: &Report) -> serde_json::Value {
    let output = SarifFormatter::default().format(report).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn log_header() {
    let value = render(&Report::default());
    assert_eq!(value["version"], "2.1.0");
    assert!(value["$schema"].as_str().unwrap().contains("sarif-schema-2.1.0"));
    assert_eq!(value["runs"][0]["tool"]["driver"]["name"], "cpp-style-guard");
    assert_eq!(value["runs"][0]["results"].as_array().unwrap().len(), 0);
}

#[test]
fn driver_describes_every_rule() {
    let value = render(&Report::default());
    let rules = value["runs"][0]["tool"]["driver"]["rules"]
        .as_array()
        .unwrap();
    let registry = RuleRegistry::builtin();
    assert_eq!(rules.len(), registry.len() + ENGINE_RULES.len());
    assert_eq!(rules[0]["id"], "line-width");
    let hygiene = rules.iter().find(|r| r["id"] == "header-hygiene").unwrap();
    assert_eq!(hygiene["defaultConfiguration"]["level"], "warning");
    assert!(rules.iter().any(|r| r["id"] == INTERNAL_ERROR));
}

#[test]
fn results_reference_rules_and_regions() {
    let value = render(&sample_report());
    let rules = value["runs"][0]["tool"]["driver"]["rules"]
        .as_array()
        .unwrap();
    let results = value["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first["ruleId"], "namespace-using");
    let index = usize::try_from(first["ruleIndex"].as_u64().unwrap()).unwrap();
    assert_eq!(rules[index]["id"], "namespace-using");
    assert_eq!(first["level"], "error");
    let location = &first["locations"][0]["physicalLocation"];
    assert_eq!(location["artifactLocation"]["uri"], "include/widget.hpp");
    assert_eq!(location["region"]["startLine"], 4);
    assert_eq!(location["region"]["startColumn"], 1);

    assert_eq!(results[1]["ruleId"], MALFORMED_INPUT);
    let index = usize::try_from(results[1]["ruleIndex"].as_u64().unwrap()).unwrap();
    assert_eq!(rules[index]["id"], MALFORMED_INPUT);
}

#[test]
fn unknown_rule_ids_omit_the_index() {
    let report = Report::new(
        vec![FileReport::new(
            "a.cpp",
            vec![Diagnostic::new(
                "a.cpp",
                "custom-rule",
                Severity::Warning,
                DiagnosticCategory::Rule,
                "custom",
                1,
                1,
            )],
        )],
        0,
    );
    let value = render(&report);
    let result = &value["runs"][0]["results"][0];
    assert!(result.get("ruleIndex").is_none());
    assert_eq!(result["level"], "warning");
}
