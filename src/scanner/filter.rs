use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, StyleGuardError};
use crate::language::{SourceKind, SourceKindRegistry};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Decides which paths are C++ sources worth checking.
///
/// A path is a source when the [`SourceKindRegistry`] knows its extension and
/// no exclude glob matches it. Globs are tried against the path as given and
/// against the same path with leading `./` components removed, so
/// `third_party/**` and `**/third_party/**` both work for `./third_party/x.h`.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    kinds: SourceKindRegistry,
    exclude: GlobSet,
}

impl SourceFilter {
    /// # Errors
    /// Returns [`StyleGuardError::InvalidPattern`] naming the first bad glob.
    pub fn new(kinds: SourceKindRegistry, exclude: &[String]) -> Result<Self> {
        Ok(Self {
            kinds,
            exclude: exclude_set(exclude)?,
        })
    }

    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.is_match(path) || self.exclude.is_match(without_cur_dir(path))
    }

    /// Kind of a checkable source, or `None` for excluded and unknown files.
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<SourceKind> {
        if self.is_excluded(path) {
            return None;
        }
        self.kinds.classify(path)
    }

    #[must_use]
    pub const fn kinds(&self) -> &SourceKindRegistry {
        &self.kinds
    }
}

impl FileFilter for SourceFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.classify(path).is_some()
    }
}

fn exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let invalid = |pattern: &str, source| StyleGuardError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    };
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| invalid(pattern, e))?);
    }
    builder.build().map_err(|e| invalid("combined patterns", e))
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
