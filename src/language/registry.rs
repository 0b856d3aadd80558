use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::FilesConfig;

/// Whether a file declares an interface (header) or implements one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Interface,
    Implementation,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Implementation => "implementation",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps file extensions to a [`SourceKind`].
#[derive(Debug, Clone)]
pub struct SourceKindRegistry {
    extension_map: HashMap<String, SourceKind>,
}

impl SourceKindRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extension_map: HashMap::new(),
        }
    }

    /// Extensions are matched case-insensitively, with or without a leading dot.
    pub fn register(&mut self, extension: &str, kind: SourceKind) {
        self.extension_map.insert(normalize(extension), kind);
    }

    #[must_use]
    pub fn from_config(files: &FilesConfig) -> Self {
        let mut registry = Self::new();
        for ext in &files.interface_extensions {
            registry.register(ext, SourceKind::Interface);
        }
        for ext in &files.implementation_extensions {
            registry.register(ext, SourceKind::Implementation);
        }
        registry
    }

    #[must_use]
    pub fn get_by_extension(&self, ext: &str) -> Option<SourceKind> {
        self.extension_map.get(&normalize(ext)).copied()
    }

    /// Classify a path by its extension. `None` for files that are not checked.
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<SourceKind> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_by_extension(ext))
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extension_map.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

impl Default for SourceKindRegistry {
    fn default() -> Self {
        Self::from_config(&FilesConfig::default())
    }
}

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
