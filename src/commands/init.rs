use std::fs;

use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result, StyleGuardError};

#[must_use]
pub fn run_init(args: &crate::cli::InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &crate::cli::InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(StyleGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# cpp-style-guard configuration file
version = "1"

# Maximum line width in characters (default: 100)
max_line_width = 100

# Enable only these rules (default: every rule)
# rules = ["line-width", "brace-style", "variable-naming"]

# Rules to turn off
disable = []

# Per-rule severity: "error" or "warning"
[severity_overrides]
# enum-underlying-type = "error"
# header-hygiene = "error"

[files]
interface_extensions = ["h", "hh", "hpp", "hxx"]
implementation_extensions = ["c", "cc", "cpp", "cxx"]

# Exclude patterns (glob syntax)
exclude = [
    "**/third_party/**",
    "**/build/**",
]

[heuristics]
# Types passed by value like plain data, in addition to built-in types and enums
pod_types = []

# Types that may be taken by value as sink parameters
sink_types = [
    "std::unique_ptr",
    "std::shared_ptr",
    "std::function",
    "std::string_view",
    "std::span",
]

# Headers that must never be included
umbrella_headers = ["bits/stdc++.h"]

# Comment marker that lets a plain enum stay plain for C interop
c_interop_marker = "c-interop"

# Words that document a public alias as permanent
alias_permanence_keywords = ["permanent", "stable", "guarantee"]

# Accept a signature split right after its return type
allow_return_type_split = true

# Name fragments that justify an explicit enum underlying type
low_level_enum_hints = ["flag", "mask", "bit", "register", "opcode", "wire", "packed", "protocol"]

# Longest macro name allowed without an underscore (0 disables the check)
macro_max_word_length = 0

# Symbols provided by project headers, used to spot unused includes in headers
[heuristics.header_symbols]
# "widget/widget.h" = ["Widget", "makeWidget"]
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
