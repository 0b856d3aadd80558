//! Per-file pipeline and the parallel run over many files.
//!
//! Each file is tokenized, parsed and handed to every selected rule. Failures
//! stay inside the smallest unit that produced them: a panicking rule becomes
//! an `internal-error` diagnostic, an unreadable file an `input-error`
//! diagnostic, and neither stops the rest of the run.

mod report;

pub use report::{FileReport, Report};

use std::any::Any;
use std::cell::Cell;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

use rayon::prelude::*;

use crate::config::Config;
use crate::diagnostic::{
    Diagnostic, DiagnosticCategory, INPUT_ERROR, INTERNAL_ERROR, MALFORMED_INPUT, Severity,
};
use crate::error::{Result, StyleGuardError};
use crate::language::SourceKind;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::rules::{self, RuleContext, RuleSet, SelectedRule};

/// A file queued for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Source of file bytes, injectable for tests.
pub trait FileReader: Send + Sync {
    /// Read file contents as bytes.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileReader;

impl FileReader for RealFileReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Cooperative cancellation flag, checked before each file starts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Engine<'a> {
    rules: &'a RuleSet<'a>,
    config: &'a Config,
    reader: &'a dyn FileReader,
    fail_fast: bool,
    cancel: CancelToken,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub fn new(rules: &'a RuleSet<'a>, config: &'a Config) -> Self {
        Self {
            rules,
            config,
            reader: &RealFileReader,
            fail_fast: false,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_reader(mut self, reader: &'a dyn FileReader) -> Self {
        self.reader = reader;
        self
    }

    /// Stop starting new files once a file reports an error-severity diagnostic.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Check in-memory source text.
    #[must_use]
    pub fn check_source(&self, path: &Path, text: &str, kind: SourceKind) -> FileReport {
        let parsed = contain(|| {
            let stream = tokenize(text);
            let tree = parse(&stream.tokens);
            (stream, tree)
        });
        let (stream, tree) = match parsed {
            Ok(parsed) => parsed,
            Err(reason) => {
                log::warn!("Parsing {} failed: {reason}", path.display());
                let diagnostic = internal_error(path, format!("parser failed: {reason}"));
                return FileReport::new(path, vec![diagnostic]);
            }
        };
        let mut diagnostics = Vec::new();

        // Rules only see the part of the file the tokenizer recognized.
        let source = match stream.error {
            Some(error) => {
                diagnostics.push(Diagnostic::new(
                    path,
                    MALFORMED_INPUT,
                    Severity::Error,
                    DiagnosticCategory::MalformedSource,
                    error.kind.to_string(),
                    error.pos.line,
                    error.pos.column,
                ));
                &text[..error.pos.offset]
            }
            None => text,
        };

        let ctx = RuleContext {
            path,
            source,
            kind,
            tokens: &stream.tokens,
            tree: &tree,
            max_line_width: self.config.max_line_width,
            heuristics: &self.config.heuristics,
        };

        for selected in self.rules.iter() {
            diagnostics.extend(run_rule(selected, &ctx));
        }
        diagnostics.sort();
        log::trace!("{}: {} diagnostic(s)", path.display(), diagnostics.len());
        FileReport::new(path, diagnostics)
    }

    /// Read and check one file. Read and decoding failures become `input-error` diagnostics.
    #[must_use]
    pub fn check_file(&self, file: &SourceFile) -> FileReport {
        log::debug!("Checking {} ({})", file.path.display(), file.kind);
        match self.read_text(&file.path) {
            Ok(text) => self.check_source(&file.path, &text, file.kind),
            Err((error, line, column)) => {
                log::debug!("{error}");
                let mut diagnostic = input_error(&file.path, &error);
                diagnostic.line = line;
                diagnostic.column = column;
                FileReport::new(&file.path, vec![diagnostic])
            }
        }
    }

    /// File text, or the input error with the position it refers to.
    fn read_text(&self, path: &Path) -> std::result::Result<String, (StyleGuardError, usize, usize)> {
        let bytes = self.reader.read(path).map_err(|source| {
            let error = StyleGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            };
            (error, 1, 1)
        })?;
        String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            let column = valid.iter().rev().take_while(|&&b| b != b'\n').count() + 1;
            let error = StyleGuardError::InvalidEncoding {
                path: path.to_path_buf(),
            };
            (error, line, column)
        })
    }

    /// Check `files` on a rayon pool of `jobs` threads (0 uses every core).
    ///
    /// `on_file` runs after each file, checked or skipped.
    ///
    /// # Errors
    /// Returns an error if the thread pool cannot be created.
    pub fn run<P>(&self, files: &[SourceFile], jobs: usize, on_file: P) -> Result<Report>
    where
        P: Fn() + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        let outcomes: Vec<Option<FileReport>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let outcome = self.run_one(file);
                    on_file();
                    outcome
                })
                .collect()
        });

        let skipped = outcomes.iter().filter(|o| o.is_none()).count();
        let reports: Vec<FileReport> = outcomes.into_iter().flatten().collect();
        if skipped > 0 {
            log::debug!("Run cancelled: {skipped} file(s) skipped");
        }
        Ok(Report::new(reports, skipped))
    }

    fn run_one(&self, file: &SourceFile) -> Option<FileReport> {
        if self.cancel.is_cancelled() {
            log::trace!("Skipping {}: run cancelled", file.path.display());
            return None;
        }
        let report = self.check_file(file);
        if self.fail_fast && report.has_errors() {
            log::debug!("{} has errors, cancelling remaining files", file.path.display());
            self.cancel.cancel();
        }
        Some(report)
    }
}

fn run_rule(selected: &SelectedRule<'_>, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
    let rule = selected.rule;
    match contain(|| rules::apply(rule, ctx)) {
        Ok(findings) => findings
            .into_iter()
            .map(|finding| {
                Diagnostic::new(
                    ctx.path,
                    rule.id(),
                    selected.severity,
                    DiagnosticCategory::Rule,
                    finding.message,
                    finding.pos.line,
                    finding.pos.column,
                )
            })
            .collect(),
        Err(reason) => {
            log::warn!(
                "Rule {} failed on {}: {reason}",
                rule.id(),
                ctx.path.display()
            );
            vec![internal_error(
                ctx.path,
                format!("rule `{}` failed: {reason}", rule.id()),
            )]
        }
    }
}

/// `input-error` diagnostic at 1:1 for a file or directory that could not be read.
#[must_use]
pub fn input_error(path: &Path, error: &StyleGuardError) -> Diagnostic {
    let message = match error {
        StyleGuardError::FileRead { source, .. } => format!("{error}: {source}"),
        StyleGuardError::DirectoryWalk { source, .. } => format!("{error}: {source}"),
        _ => error.to_string(),
    };
    Diagnostic::new(
        path,
        INPUT_ERROR,
        Severity::Error,
        DiagnosticCategory::Input,
        message,
        1,
        1,
    )
}

fn internal_error(path: &Path, message: String) -> Diagnostic {
    Diagnostic::new(
        path,
        INTERNAL_ERROR,
        Severity::Error,
        DiagnosticCategory::Internal,
        message,
        1,
        1,
    )
}

thread_local! {
    static CONTAINED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Run `f`, turning a panic into its message.
///
/// Panics raised here are logged at debug level instead of going through the
/// default hook, so a failing rule does not print a backtrace next to its
/// `internal-error` diagnostic. Panics on other threads keep the previous hook.
fn contain<T>(f: impl FnOnce() -> T) -> std::result::Result<T, String> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CONTAINED.with(Cell::get) {
                log::debug!("Contained panic: {info}");
            } else {
                previous(info);
            }
        }));
    });
    let outer = CONTAINED.with(|flag| flag.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    CONTAINED.with(|flag| flag.set(outer));
    outcome.map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
