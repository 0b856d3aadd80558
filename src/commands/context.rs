use std::fs;
use std::path::Path;

use crate::cli::ColorChoice;
use crate::config::{Config, ConfigLoader, FileConfigLoader, LoadResult};
use crate::error::StyleGuardError;
use crate::output::ColorMode;
use crate::{EXIT_CONFIG_ERROR, EXIT_TOOL_FAILURE};

#[must_use]
pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load the configuration for a command.
///
/// `--no-config` wins over everything; an explicit path must exist; otherwise
/// the loader searches the default locations.
///
/// # Errors
/// Returns an error if the configuration file cannot be read, parsed or validated.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> crate::Result<LoadResult> {
    if no_config {
        log::debug!("Configuration loading disabled, using defaults");
        return Ok(LoadResult {
            config: Config::default(),
            source: None,
        });
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Write output to a file or stdout.
///
/// When `output_path` is `Some`, the content is written to the file, creating
/// parent directories if needed.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        log::debug!("Wrote report to {}", path.display());
    } else {
        print!("{content}");
    }
    Ok(())
}

/// Exit status for an error that aborted a command.
#[must_use]
pub(crate) const fn exit_code_for(error: &StyleGuardError) -> i32 {
    match error {
        StyleGuardError::Io(_) | StyleGuardError::ThreadPool(_) => EXIT_TOOL_FAILURE,
        _ => EXIT_CONFIG_ERROR,
    }
}
