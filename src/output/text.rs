use std::fmt::Write;

use crate::diagnostic::{Diagnostic, DiagnosticCategory, Severity};
use crate::engine::Report;
use crate::error::Result;

use super::{ColorMode, OutputFormatter, ansi, display_path};

/// One line per diagnostic (`path:line:col: [severity] rule-id: message`) plus a summary.
pub struct TextFormatter {
    use_colors: bool,
    show_summary: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            show_summary: true,
        }
    }

    /// Omit the trailing summary line (used by `--quiet`).
    #[must_use]
    pub const fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn severity_color(diagnostic: &Diagnostic) -> &'static str {
        match (diagnostic.category, diagnostic.severity) {
            (DiagnosticCategory::Input | DiagnosticCategory::Internal, _) => ansi::CYAN,
            (_, Severity::Error) => ansi::RED,
            (_, Severity::Warning) => ansi::YELLOW,
        }
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic, output: &mut String) {
        let severity = self.colorize(
            &format!("[{}]", diagnostic.severity),
            Self::severity_color(diagnostic),
        );
        let rule = self.colorize(&diagnostic.rule_id, ansi::BOLD);
        let _ = writeln!(
            output,
            "{}:{}:{}: {severity} {rule}: {}",
            display_path(&diagnostic.path),
            diagnostic.line,
            diagnostic.column,
            diagnostic.message
        );
    }

    fn format_summary(&self, report: &Report) -> String {
        let errors = report.error_count();
        let warnings = report.warning_count();
        let errors_str = self.colorize(&errors.to_string(), ansi::RED);
        let warnings_str = self.colorize(&warnings.to_string(), ansi::YELLOW);

        let mut summary = format!(
            "Summary: {} files checked, {errors_str} {}, {warnings_str} {}",
            report.files_checked(),
            plural(errors, "error", "errors"),
            plural(warnings, "warning", "warnings"),
        );
        if report.files_skipped() > 0 {
            let _ = write!(summary, " ({} skipped)", report.files_skipped());
        }
        summary
    }
}

const fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        for diagnostic in report.diagnostics() {
            self.format_diagnostic(diagnostic, &mut output);
        }
        if self.show_summary {
            if !report.diagnostics().is_empty() {
                output.push('\n');
            }
            let summary = self.format_summary(report);
            let _ = writeln!(output, "{summary}");
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
