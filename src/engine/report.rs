use std::path::PathBuf;

use crate::diagnostic::{Diagnostic, Severity};
use crate::{EXIT_SUCCESS, EXIT_TOOL_FAILURE, EXIT_VIOLATIONS};

/// Diagnostics of a single checked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path: path.into(),
            diagnostics,
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Merged, sorted result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
    files_checked: usize,
    files_skipped: usize,
}

impl Report {
    /// Merge per-file results. Diagnostics end up ordered by file, line, column and rule id.
    #[must_use]
    pub fn new(files: Vec<FileReport>, files_skipped: usize) -> Self {
        let files_checked = files.len();
        let mut diagnostics: Vec<Diagnostic> =
            files.into_iter().flat_map(|f| f.diagnostics).collect();
        diagnostics.sort();
        Self {
            diagnostics,
            files_checked,
            files_skipped,
        }
    }

    /// Add diagnostics that belong to no checked file, such as unreadable
    /// directories. Counts of checked and skipped files are unchanged.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
        self.diagnostics.sort();
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub const fn files_checked(&self) -> usize {
        self.files_checked
    }

    /// Files never started because the run was cancelled.
    #[must_use]
    pub const fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    #[must_use]
    pub fn has_tool_failure(&self) -> bool {
        self.diagnostics.iter().any(|d| d.category.is_tool_failure())
    }

    /// Process exit status. Tool failures outrank violations; `strict` counts warnings.
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.has_tool_failure() {
            EXIT_TOOL_FAILURE
        } else if self.error_count() > 0 || (strict && self.warning_count() > 0) {
            EXIT_VIOLATIONS
        } else {
            EXIT_SUCCESS
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
