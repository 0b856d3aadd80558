use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown rule identifier: {0}")]
    UnknownRule(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory entry: {path}")]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl StyleGuardError {
    /// Short error category name, used in structured error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::UnknownRule(_) => "UnknownRule",
            Self::FileRead { .. } => "FileRead",
            Self::DirectoryWalk { .. } => "DirectoryWalk",
            Self::InvalidEncoding { .. } => "InvalidEncoding",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
            Self::ThreadPool(_) => "ThreadPool",
        }
    }

    /// The file or directory an input error is about.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileRead { path, .. }
            | Self::DirectoryWalk { path, .. }
            | Self::InvalidEncoding { path } => Some(path.as_path()),
            _ => None,
        }
    }

    /// Whether this error belongs to a single input file rather than the whole run.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::DirectoryWalk { .. } | Self::InvalidEncoding { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StyleGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
