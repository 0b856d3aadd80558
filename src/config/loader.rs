use std::path::{Path, PathBuf};

use crate::error::{Result, StyleGuardError};

use super::Config;
use super::model::CONFIG_VERSION;
use super::validation::validate_config_semantics;

/// A loaded configuration and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub config: Config,
    /// `None` when no config file was found and defaults apply.
    pub source: Option<PathBuf>,
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be read, parsed or validated.
    fn load(&self) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

pub const LOCAL_CONFIG_NAME: &str = ".cpp-style-guard.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Platform config directory for cpp-style-guard:
    /// - Windows: `%APPDATA%\cpp-style-guard`
    /// - macOS: `~/Library/Application Support/cpp-style-guard`
    /// - Linux: `~/.config/cpp-style-guard` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cpp-style-guard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.cpp-style-guard.toml` in the current directory
/// 2. `config.toml` in the platform config directory
/// 3. `Config::default()`
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let local = self
            .fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME));
        let user = self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME));
        local.into_iter().chain(user).collect()
    }
}

/// Parse and validate config text.
///
/// # Errors
/// Returns an error for invalid TOML, an unsupported version or values that
/// fail semantic validation.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    match config.version.as_deref() {
        None | Some(CONFIG_VERSION) => {}
        Some(other) => {
            return Err(StyleGuardError::Config(format!(
                "Unsupported config version '{other}'. Only version '{CONFIG_VERSION}' is supported."
            )));
        }
    }
    validate_config_semantics(&config)?;
    Ok(config)
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<LoadResult> {
        for path in self.candidates() {
            if self.fs.exists(&path) {
                return self.load_from_path(&path);
            }
        }
        log::debug!("No config file found, using defaults");
        Ok(LoadResult {
            config: Config::default(),
            source: None,
        })
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| StyleGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = parse_config(&content).map_err(|e| match e {
            StyleGuardError::TomlParse(inner) => {
                StyleGuardError::Config(format!("{}: {inner}", path.display()))
            }
            other => other,
        })?;
        log::debug!("Using config file {}", path.display());
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
