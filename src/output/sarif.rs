use serde::Serialize;

use crate::diagnostic::{Diagnostic, INPUT_ERROR, INTERNAL_ERROR, MALFORMED_INPUT, Severity};
use crate::engine::Report;
use crate::error::Result;
use crate::rules::RuleRegistry;

use super::{OutputFormatter, display_path};

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "cpp-style-guard";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Descriptors for the diagnostics the engine emits itself.
const ENGINE_RULES: &[(&str, &str)] = &[
    (
        MALFORMED_INPUT,
        "The tokenizer stopped at an unterminated comment or literal",
    ),
    (INPUT_ERROR, "The file could not be read or is not valid UTF-8"),
    (INTERNAL_ERROR, "A rule failed while checking the file"),
];

/// SARIF 2.1.0 output for code-scanning integrations.
pub struct SarifFormatter {
    rules: Vec<ReportingDescriptor>,
}

impl SarifFormatter {
    /// Build a formatter describing every rule in `registry`.
    #[must_use]
    pub fn new(registry: &RuleRegistry) -> Self {
        let mut rules: Vec<ReportingDescriptor> = registry
            .iter()
            .map(|rule| {
                ReportingDescriptor::new(rule.id(), rule.description(), rule.default_severity())
            })
            .collect();
        rules.extend(
            ENGINE_RULES
                .iter()
                .map(|(id, text)| ReportingDescriptor::new(id, text, Severity::Error)),
        );
        Self { rules }
    }

    fn rule_index(&self, rule_id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == rule_id)
    }

    fn convert(&self, diagnostic: &Diagnostic) -> SarifResult {
        SarifResult {
            rule_id: diagnostic.rule_id.clone(),
            rule_index: self.rule_index(&diagnostic.rule_id),
            level: level(diagnostic.severity),
            message: Message {
                text: diagnostic.message.clone(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: display_path(&diagnostic.path),
                        uri_base_id: "%SRCROOT%",
                    },
                    region: Region {
                        start_line: diagnostic.line,
                        start_column: diagnostic.column,
                    },
                },
            }],
        }
    }
}

impl Default for SarifFormatter {
    fn default() -> Self {
        Self::new(&RuleRegistry::builtin())
    }
}

const fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run<'a>>,
}

#[derive(Serialize)]
struct Run<'a> {
    tool: Tool<'a>,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool<'a> {
    driver: ToolDriver<'a>,
}

#[derive(Serialize)]
struct ToolDriver<'a> {
    name: &'static str,
    version: &'static str,
    rules: &'a [ReportingDescriptor],
}

#[derive(Serialize)]
struct ReportingDescriptor {
    id: String,
    #[serde(rename = "shortDescription")]
    short_description: Message,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: ReportingConfiguration,
}

impl ReportingDescriptor {
    fn new(id: &str, description: &str, severity: Severity) -> Self {
        Self {
            id: id.to_string(),
            short_description: Message {
                text: description.to_string(),
            },
            default_configuration: ReportingConfiguration {
                level: level(severity),
            },
        }
    }
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    #[serde(rename = "ruleIndex", skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
struct Location {
    #[serde(rename = "physicalLocation")]
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
struct ArtifactLocation {
    uri: String,
    #[serde(rename = "uriBaseId")]
    uri_base_id: &'static str,
}

#[derive(Serialize)]
struct Region {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn")]
    start_column: usize,
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let results = report
            .diagnostics()
            .iter()
            .map(|d| self.convert(d))
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules: &self.rules,
                    },
                },
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
