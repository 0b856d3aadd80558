mod filter;

pub use filter::{FileFilter, SourceFilter};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::engine::SourceFile;
use crate::error::{Result, StyleGuardError};
use crate::language::{SourceKind, SourceKindRegistry};

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths, plus the entries
    /// that could not be read.
    ///
    /// # Errors
    /// Returns an error if scanning cannot start.
    fn scan(&self, root: &Path) -> Result<ScanResult>;
}

/// Outcome of walking one directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    /// Unreadable entries; reported, never silently dropped
    pub failures: Vec<StyleGuardError>,
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    fn scan_impl(&self, root: &Path) -> ScanResult {
        let mut result = ScanResult::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.filter.should_include(entry.path()) {
                        result.files.push(entry.into_path());
                    }
                }
                Err(source) => {
                    let path = source.path().unwrap_or(root).to_path_buf();
                    log::warn!("Cannot read {}: {source}", path.display());
                    result
                        .failures
                        .push(StyleGuardError::DirectoryWalk { path, source });
                }
            }
        }
        result
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<ScanResult> {
        Ok(self.scan_impl(root))
    }
}

/// Sources to check and the directory entries the walk could not read.
#[derive(Debug, Default)]
pub struct SourceSet {
    pub files: Vec<SourceFile>,
    pub unreadable: Vec<StyleGuardError>,
}

/// Expand command-line paths into classified source files.
///
/// Directories are walked; explicit files are kept when their extension is
/// known and no exclude pattern matches. A path that does not exist is passed
/// through so the engine reports it as an input error, and walk failures are
/// collected in [`SourceSet::unreadable`]. Files come back sorted and free of
/// duplicates.
///
/// # Errors
/// Returns an error if an exclude pattern is invalid.
pub fn collect_sources(
    paths: &[PathBuf],
    registry: &SourceKindRegistry,
    exclude: &[String],
) -> Result<SourceSet> {
    let scanner = DirectoryScanner::new(SourceFilter::new(registry.clone(), exclude)?);
    let filter = scanner.filter();

    let mut set = SourceSet::default();
    for path in paths {
        if path.is_dir() {
            let found = scanner.scan(path)?;
            log::debug!(
                "Found {} source file(s) under {}",
                found.files.len(),
                path.display()
            );
            set.files.extend(found.files.into_iter().filter_map(|p| {
                let kind = filter.classify(&p)?;
                Some(SourceFile::new(p, kind))
            }));
            set.unreadable.extend(found.failures);
        } else if !path.exists() {
            let kind = registry
                .classify(path)
                .unwrap_or(SourceKind::Implementation);
            set.files.push(SourceFile::new(path.clone(), kind));
        } else if filter.is_excluded(path) {
            log::debug!("Excluded {}", path.display());
        } else if let Some(kind) = filter.classify(path) {
            set.files.push(SourceFile::new(path.clone(), kind));
        } else {
            log::warn!(
                "Skipping {}: not a recognized C++ source extension",
                path.display()
            );
        }
    }

    set.files.sort_by(|a, b| a.path.cmp(&b.path));
    set.files.dedup_by(|a, b| a.path == b.path);
    Ok(set)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
