use serde::Serialize;

use crate::diagnostic::{Diagnostic, DiagnosticCategory, Severity};
use crate::engine::Report;
use crate::error::Result;

use super::{OutputFormatter, display_path};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct Summary {
    files_checked: usize,
    files_skipped: usize,
    errors: usize,
    warnings: usize,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    path: String,
    line: usize,
    column: usize,
    severity: Severity,
    rule_id: &'a str,
    category: DiagnosticCategory,
    message: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                files_checked: report.files_checked(),
                files_skipped: report.files_skipped(),
                errors: report.error_count(),
                warnings: report.warning_count(),
            },
            diagnostics: report.diagnostics().iter().map(convert).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert(diagnostic: &Diagnostic) -> JsonDiagnostic<'_> {
    JsonDiagnostic {
        path: display_path(&diagnostic.path),
        line: diagnostic.line,
        column: diagnostic.column,
        severity: diagnostic.severity,
        rule_id: &diagnostic.rule_id,
        category: diagnostic.category,
        message: &diagnostic.message,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
