use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleGuardError;

/// Rule id of the diagnostic emitted when tokenizing stops early.
pub const MALFORMED_INPUT: &str = "malformed-input";
/// Rule id of the diagnostic emitted for an unreadable or non-UTF-8 file.
pub const INPUT_ERROR: &str = "input-error";
/// Rule id of the diagnostic emitted when a rule panics.
pub const INTERNAL_ERROR: &str = "internal-error";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    #[serde(alias = "warn")]
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = StyleGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            other => Err(StyleGuardError::Config(format!(
                "Invalid severity '{other}' (expected 'error' or 'warning')"
            ))),
        }
    }
}

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCategory {
    /// A style rule violation
    Rule,
    /// Source the tokenizer could not finish
    MalformedSource,
    /// File could not be read or decoded
    Input,
    /// A rule implementation failed
    Internal,
}

impl DiagnosticCategory {
    /// Tool failures, as opposed to findings about the code.
    #[must_use]
    pub const fn is_tool_failure(self) -> bool {
        matches!(self, Self::Input | Self::Internal)
    }
}

/// One reported finding, tied to a single rule and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub rule_id: String,
    pub severity: Severity,
    pub category: DiagnosticCategory,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        rule_id: impl Into<String>,
        severity: Severity,
        category: DiagnosticCategory,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            path: path.into(),
            rule_id: rule_id.into(),
            severity,
            category,
            message: message.into(),
            line,
            column,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
            .then_with(|| self.rule_id.cmp(&other.rule_id))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}: {}",
            self.path.display(),
            self.line,
            self.column,
            self.severity,
            self.rule_id,
            self.message
        )
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
