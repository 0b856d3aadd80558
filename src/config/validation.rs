//! Configuration semantic validation.
//!
//! Checks values that parse fine but cannot work: zero widths, empty or
//! overlapping extension lists and broken glob patterns. Rule identifiers are
//! checked against the registry when rules are selected.

use globset::Glob;

use crate::config::Config;
use crate::error::{Result, StyleGuardError};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error describing the first invalid value.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    if config.max_line_width == 0 {
        return Err(StyleGuardError::Config(
            "max_line_width must be greater than 0".to_string(),
        ));
    }
    validate_extensions(config)?;
    for pattern in &config.files.exclude {
        Glob::new(pattern).map_err(|source| StyleGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}

fn validate_extensions(config: &Config) -> Result<()> {
    let files = &config.files;
    if files.interface_extensions.is_empty() && files.implementation_extensions.is_empty() {
        return Err(StyleGuardError::Config(
            "files: at least one interface or implementation extension is required".to_string(),
        ));
    }
    for ext in files
        .interface_extensions
        .iter()
        .chain(&files.implementation_extensions)
    {
        if ext.trim_start_matches('.').is_empty() {
            return Err(StyleGuardError::Config(
                "files: empty extension".to_string(),
            ));
        }
    }
    if let Some(shared) = files.interface_extensions.iter().find(|ext| {
        files
            .implementation_extensions
            .iter()
            .any(|other| other.trim_start_matches('.') == ext.trim_start_matches('.'))
    }) {
        return Err(StyleGuardError::Config(format!(
            "files: extension '{shared}' is listed as both interface and implementation"
        )));
    }
    Ok(())
}
